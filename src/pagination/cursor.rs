//! Lazy iteration over every page of a collection.

use std::fmt;
use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::api::{ApiError, Resource};
use crate::clients::ResourceClient;
use crate::pagination::factory::PageFactory;
use crate::pagination::page::Page;

/// Builds the cursor returned by
/// [`ResourceApi::all`](crate::api::ResourceApi::all).
pub trait CursorFactory: Send + Sync {
    /// The cursor type produced by this factory.
    type Cursor;

    /// Creates a cursor starting at `first_page`.
    fn create_cursor(&self, page_size: u32, first_page: Page) -> Self::Cursor;
}

/// [`CursorFactory`] producing [`ResourceCursor`]s.
pub struct ResourceCursorFactory<C, P> {
    client: Arc<C>,
    page_factory: Arc<P>,
}

impl<C, P> ResourceCursorFactory<C, P> {
    /// Creates a factory whose cursors fetch pages through `client`.
    #[must_use]
    pub const fn new(client: Arc<C>, page_factory: Arc<P>) -> Self {
        Self {
            client,
            page_factory,
        }
    }
}

impl<C, P> Clone for ResourceCursorFactory<C, P> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            page_factory: Arc::clone(&self.page_factory),
        }
    }
}

impl<C, P> fmt::Debug for ResourceCursorFactory<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCursorFactory").finish_non_exhaustive()
    }
}

impl<C, P> CursorFactory for ResourceCursorFactory<C, P>
where
    C: ResourceClient,
    P: PageFactory,
{
    type Cursor = ResourceCursor<C, P>;

    fn create_cursor(&self, page_size: u32, first_page: Page) -> Self::Cursor {
        ResourceCursor::new(
            Arc::clone(&self.client),
            Arc::clone(&self.page_factory),
            page_size,
            first_page,
        )
    }
}

/// Forward-only cursor over all resources of a collection.
///
/// The cursor starts on an already fetched page and follows `next` links
/// lazily, one page at a time. It ends when the current page has no next
/// link or a fetched page is empty; after that [`next`](Self::next) keeps
/// returning `Ok(None)`.
///
/// Advancing takes `&mut self`: sharing a cursor between tasks requires
/// external synchronization.
///
/// # Example
///
/// ```rust,ignore
/// let mut cursor = client.attributes().all((), 100, QueryParameters::new()).await?;
/// while let Some(attribute) = cursor.next().await? {
///     println!("{}", attribute["code"]);
/// }
/// ```
pub struct ResourceCursor<C, P> {
    client: Arc<C>,
    page_factory: Arc<P>,
    page_size: u32,
    first_page: Page,
    current_page: Page,
    position: usize,
    exhausted: bool,
}

impl<C, P> ResourceCursor<C, P>
where
    C: ResourceClient,
    P: PageFactory,
{
    /// Creates a cursor positioned before the first item of `first_page`.
    #[must_use]
    pub fn new(client: Arc<C>, page_factory: Arc<P>, page_size: u32, first_page: Page) -> Self {
        Self {
            client,
            page_factory,
            page_size,
            current_page: first_page.clone(),
            first_page,
            position: 0,
            exhausted: false,
        }
    }

    /// Returns the page size the cursor was created with.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the page the cursor is currently reading.
    #[must_use]
    pub const fn current_page(&self) -> &Page {
        &self.current_page
    }

    /// Returns the next resource, fetching the next page when needed.
    ///
    /// # Errors
    ///
    /// Returns the error of a failed page fetch. The cursor stays on its
    /// current page, so calling `next` again retries the fetch.
    pub async fn next(&mut self) -> Result<Option<Resource>, ApiError> {
        loop {
            if self.exhausted {
                return Ok(None);
            }

            if let Some(resource) = self.current_page.items().get(self.position) {
                self.position += 1;
                return Ok(Some(resource.clone()));
            }

            let Some(link) = self.current_page.next_link().map(str::to_string) else {
                self.exhausted = true;
                return Ok(None);
            };

            tracing::trace!(link = %link, page_size = self.page_size, "Fetching next page");
            let data = self.client.get_resources_by_link(&link).await?;
            let page = self.page_factory.create_page(data)?;

            self.exhausted = page.is_empty();
            self.current_page = page;
            self.position = 0;
        }
    }

    /// Moves the cursor back before the first item of the first page.
    ///
    /// The first page is kept in memory and not fetched again.
    pub fn rewind(&mut self) {
        self.current_page = self.first_page.clone();
        self.position = 0;
        self.exhausted = false;
    }

    /// Converts the cursor into a stream yielding the same sequence.
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> BoxStream<'static, Result<Resource, ApiError>>
    where
        C: 'static,
        P: 'static,
    {
        stream::try_unfold(self, Self::advance).boxed()
    }

    async fn advance(mut self) -> Result<Option<(Resource, Self)>, ApiError> {
        Ok(self.next().await?.map(|resource| (resource, self)))
    }
}

impl<C, P> fmt::Debug for ResourceCursor<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCursor")
            .field("page_size", &self.page_size)
            .field("position", &self.position)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{QueryParameters, UpsertListItem, UpsertListResponse, WriteResult};
    use crate::pagination::HalPageFactory;
    use async_trait::async_trait;
    use futures::future::BoxFuture;
    use futures::TryStreamExt;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages by link and records every fetched link.
    #[derive(Default)]
    struct LinkClient {
        pages: HashMap<String, Value>,
        fetched: Mutex<Vec<String>>,
    }

    impl LinkClient {
        fn with_page(mut self, link: &str, page: Value) -> Self {
            self.pages.insert(link.to_string(), page);
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceClient for LinkClient {
        async fn get_resource(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _query: &QueryParameters,
        ) -> Result<Resource, ApiError> {
            unimplemented!()
        }

        async fn get_resources(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _limit: Option<u32>,
            _with_count: Option<bool>,
            _query: &QueryParameters,
        ) -> Result<Value, ApiError> {
            unimplemented!()
        }

        async fn get_resources_by_link(&self, link: &str) -> Result<Value, ApiError> {
            self.fetched.lock().unwrap().push(link.to_string());
            self.pages
                .get(link)
                .cloned()
                .ok_or_else(|| ApiError::NotFound {
                    message: link.to_string(),
                })
        }

        async fn create_resource(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _body: &Resource,
        ) -> Result<WriteResult, ApiError> {
            unimplemented!()
        }

        async fn upsert_resource(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _body: &Resource,
        ) -> Result<WriteResult, ApiError> {
            unimplemented!()
        }

        fn upsert_async_resource(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _body: Resource,
        ) -> BoxFuture<'static, Result<WriteResult, ApiError>> {
            unimplemented!()
        }

        fn upsert_stream_resource_list(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _resources: BoxStream<'static, Resource>,
        ) -> BoxStream<'static, Result<UpsertListItem, ApiError>> {
            unimplemented!()
        }

        fn upsert_async_stream_resource_list(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
            _resources: Vec<Resource>,
        ) -> BoxFuture<'static, Result<UpsertListResponse, ApiError>> {
            unimplemented!()
        }

        async fn delete_resource(
            &self,
            _uri: &str,
            _uri_parameters: &[String],
        ) -> Result<WriteResult, ApiError> {
            unimplemented!()
        }
    }

    fn item(code: &str) -> Resource {
        json!({ "code": code }).as_object().unwrap().clone()
    }

    fn hal(codes: &[&str], next: Option<&str>) -> Value {
        let items: Vec<Value> = codes.iter().map(|code| json!({ "code": code })).collect();
        let mut links = json!({});
        if let Some(next) = next {
            links["next"] = json!({ "href": next });
        }
        json!({ "_links": links, "_embedded": { "items": items } })
    }

    fn new_cursor(client: LinkClient, first_page: Page) -> ResourceCursor<LinkClient, HalPageFactory> {
        ResourceCursorFactory::new(Arc::new(client), Arc::new(HalPageFactory))
            .create_cursor(2, first_page)
    }

    async fn drain(cursor: &mut ResourceCursor<LinkClient, HalPageFactory>) -> Vec<String> {
        let mut codes = Vec::new();
        while let Some(resource) = cursor.next().await.unwrap() {
            codes.push(resource["code"].as_str().unwrap().to_string());
        }
        codes
    }

    #[tokio::test]
    async fn test_single_page_without_next_link() {
        let client = Arc::new(LinkClient::default());
        let mut cursor = ResourceCursor::new(
            Arc::clone(&client),
            Arc::new(HalPageFactory),
            10,
            Page::new(vec![item("a"), item("b")]),
        );

        assert_eq!(drain(&mut cursor).await, vec!["a", "b"]);
        assert!(cursor.next().await.unwrap().is_none());
        assert!(client.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_follows_chain_of_three_pages() {
        let client = Arc::new(
            LinkClient::default()
                .with_page("page-b", hal(&["c", "d"], Some("page-c")))
                .with_page("page-c", hal(&["e"], None)),
        );
        let first = Page::new(vec![item("a"), item("b")]).with_next_link("page-b");
        let mut cursor = ResourceCursor::new(
            Arc::clone(&client),
            Arc::new(HalPageFactory),
            2,
            first,
        );

        assert_eq!(drain(&mut cursor).await, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(client.fetched(), vec!["page-b", "page-c"]);
    }

    #[tokio::test]
    async fn test_empty_fetched_page_ends_iteration() {
        let client = LinkClient::default()
            .with_page("page-b", hal(&[], Some("page-c")))
            .with_page("page-c", hal(&["never"], None));
        let mut cursor = new_cursor(client, Page::new(vec![item("a")]).with_next_link("page-b"));

        assert_eq!(drain(&mut cursor).await, vec!["a"]);
        assert!(cursor.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rewind_restarts_without_refetching_first_page() {
        let client = Arc::new(LinkClient::default().with_page("page-b", hal(&["b"], None)));
        let first = Page::new(vec![item("a")]).with_next_link("page-b");
        let mut cursor = ResourceCursor::new(
            Arc::clone(&client),
            Arc::new(HalPageFactory),
            1,
            first,
        );

        assert_eq!(drain(&mut cursor).await, vec!["a", "b"]);
        cursor.rewind();
        assert_eq!(drain(&mut cursor).await, vec!["a", "b"]);
        assert_eq!(client.fetched(), vec!["page-b", "page-b"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_and_can_be_retried() {
        let client = LinkClient::default();
        let mut cursor = new_cursor(client, Page::new(vec![item("a")]).with_next_link("missing"));

        assert!(cursor.next().await.unwrap().is_some());
        assert!(matches!(
            cursor.next().await,
            Err(ApiError::NotFound { .. })
        ));
        assert!(matches!(
            cursor.next().await,
            Err(ApiError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_into_stream_yields_the_same_sequence() {
        let client = LinkClient::default().with_page("page-b", hal(&["c"], None));
        let cursor = new_cursor(
            client,
            Page::new(vec![item("a"), item("b")]).with_next_link("page-b"),
        );
        assert_eq!(cursor.page_size(), 2);

        let resources: Vec<Resource> = cursor.into_stream().try_collect().await.unwrap();
        let codes: Vec<&str> = resources
            .iter()
            .map(|resource| resource["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["a", "b", "c"]);
    }
}
