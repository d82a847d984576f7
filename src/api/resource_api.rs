//! The generic resource API.
//!
//! One [`ResourceApi`] serves one resource type. It maps operations to URI
//! templates of its [`ResourceDescriptor`], validates identifiers and
//! payloads locally, and delegates the HTTP work to a [`ResourceClient`].
//! List results are wrapped by a [`PageFactory`]; full iterations by a
//! [`CursorFactory`].
//!
//! Nothing is retried or recovered at this level: errors of the client
//! pass through unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use pim_api::{ListParams, QueryParameters};
//! use serde_json::json;
//!
//! let options = client.attribute_options();
//!
//! // One page of the options of "color"
//! let page = options.list_per_page("color", ListParams::default()).await?;
//!
//! // Every option, fetched lazily 100 at a time
//! let mut cursor = options.all("color", 100, QueryParameters::new()).await?;
//! while let Some(option) = cursor.next().await? {
//!     println!("{}", option["code"]);
//! }
//!
//! // "attribute" and "code" are injected from the identifier
//! let data = json!({"sort_order": 2}).as_object().unwrap().clone();
//! options.create(("color", "red"), data).await?;
//! ```

use std::fmt;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::stream::{self, BoxStream, Stream};
use futures::{FutureExt, StreamExt};
use serde_json::Value;

use crate::api::descriptor::ResourceDescriptor;
use crate::api::errors::ApiError;
use crate::api::identifier::ResourceIdentifier;
use crate::api::model::{Resource, UpsertListItem, UpsertListResponse, WriteResult};
use crate::api::query::{ListParams, QueryParameters};
use crate::clients::ResourceClient;
use crate::pagination::{CursorFactory, Page, PageFactory};

/// Operations on one resource type.
///
/// Identifiers are anything convertible into a [`ResourceIdentifier`]:
/// `"color"` for an attribute, `("color", "red")` for one of its options.
/// Collection operations take the parent identifier: `()` for top-level
/// collections, `"color"` for the options of `color`.
pub struct ResourceApi<C, P, F> {
    descriptor: &'static ResourceDescriptor,
    client: Arc<C>,
    page_factory: Arc<P>,
    cursor_factory: F,
}

impl<C, P, F: Clone> Clone for ResourceApi<C, P, F> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            client: Arc::clone(&self.client),
            page_factory: Arc::clone(&self.page_factory),
            cursor_factory: self.cursor_factory.clone(),
        }
    }
}

impl<C, P, F> fmt::Debug for ResourceApi<C, P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("descriptor", self.descriptor)
            .finish_non_exhaustive()
    }
}

impl<C, P, F> ResourceApi<C, P, F>
where
    C: ResourceClient,
    P: PageFactory,
    F: CursorFactory,
{
    /// Creates an API for the resource type described by `descriptor`.
    #[must_use]
    pub const fn new(
        descriptor: &'static ResourceDescriptor,
        client: Arc<C>,
        page_factory: Arc<P>,
        cursor_factory: F,
    ) -> Self {
        Self {
            descriptor,
            client,
            page_factory,
            cursor_factory,
        }
    }

    /// Returns the descriptor of the served resource type.
    #[must_use]
    pub const fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for malformed identifiers, or the
    /// error of the request.
    pub async fn get(&self, id: impl Into<ResourceIdentifier>) -> Result<Resource, ApiError> {
        self.get_with_query(id, &QueryParameters::new()).await
    }

    /// Fetches a single resource with additional query parameters, such as
    /// `with_table_select_options=true` for attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for malformed identifiers, or the
    /// error of the request.
    pub async fn get_with_query(
        &self,
        id: impl Into<ResourceIdentifier>,
        query: &QueryParameters,
    ) -> Result<Resource, ApiError> {
        let id = id.into();
        self.descriptor.check_identifier(&id)?;

        self.client
            .get_resource(self.descriptor.item_uri, id.segments(), query)
            .await
    }

    /// Fetches one page of the collection below `parent`.
    ///
    /// Issues exactly one list request with the given `limit`, `with_count`
    /// and query, and builds the page from its raw result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a malformed parent, or the
    /// error of the request or page factory.
    pub async fn list_per_page(
        &self,
        parent: impl Into<ResourceIdentifier>,
        params: ListParams,
    ) -> Result<Page, ApiError> {
        let parent = parent.into();
        self.descriptor.check_parent(&parent)?;

        let ListParams {
            limit,
            with_count,
            query,
        } = params;
        let data = self
            .client
            .get_resources(
                self.descriptor.collection_uri,
                parent.segments(),
                limit,
                with_count,
                &query,
            )
            .await?;

        self.page_factory.create_page(data)
    }

    /// Returns a cursor over every resource of the collection below `parent`.
    ///
    /// The first page is fetched eagerly, without total count; the following
    /// pages are fetched by the cursor as it advances.
    ///
    /// # Errors
    ///
    /// Returns the error of the first page request.
    pub async fn all(
        &self,
        parent: impl Into<ResourceIdentifier>,
        page_size: u32,
        query: QueryParameters,
    ) -> Result<F::Cursor, ApiError> {
        let params = ListParams::default()
            .limit(page_size)
            .with_count(false)
            .query(query);
        let first_page = self.list_per_page(parent, params).await?;

        Ok(self.cursor_factory.create_cursor(page_size, first_page))
    }

    /// Creates a resource.
    ///
    /// The identifier fields (e.g. `code`) are injected into `data` from
    /// `id`; setting them in `data` is rejected before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if `data` defines an identifier
    /// field or `id` is malformed, or the error of the request.
    pub async fn create(
        &self,
        id: impl Into<ResourceIdentifier>,
        mut data: Resource,
    ) -> Result<WriteResult, ApiError> {
        if let Some(field) = self
            .descriptor
            .identifier_fields
            .iter()
            .find(|field| data.contains_key(**field))
        {
            return Err(ApiError::invalid_argument(format!(
                "The parameter \"{field}\" should not be defined in the data parameter"
            )));
        }

        let id = id.into();
        self.descriptor.check_identifier(&id)?;

        for (field, segment) in self.descriptor.identifier_fields.iter().zip(id.segments()) {
            data.insert((*field).to_string(), Value::String(segment.clone()));
        }

        self.client
            .create_resource(
                self.descriptor.collection_uri,
                id.parent().segments(),
                &data,
            )
            .await
    }

    /// Creates the resource if absent, updates it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for malformed identifiers, or the
    /// error of the request.
    pub async fn upsert(
        &self,
        id: impl Into<ResourceIdentifier>,
        data: Resource,
    ) -> Result<WriteResult, ApiError> {
        let id = id.into();
        self.descriptor.check_identifier(&id)?;

        self.client
            .upsert_resource(self.descriptor.item_uri, id.segments(), &data)
            .await
    }

    /// Owned variant of [`upsert`](Self::upsert).
    ///
    /// The returned future borrows nothing: it can be spawned, polled later
    /// or dropped, which cancels the request. A malformed identifier makes
    /// the future resolve to [`ApiError::InvalidArgument`].
    pub fn upsert_async(
        &self,
        id: impl Into<ResourceIdentifier>,
        data: Resource,
    ) -> BoxFuture<'static, Result<WriteResult, ApiError>> {
        let id = id.into();
        if let Err(e) = self.descriptor.check_identifier(&id) {
            return future::ready(Err(e)).boxed();
        }

        self.client
            .upsert_async_resource(self.descriptor.item_uri, id.segments(), data)
    }

    /// Upserts every resource of `resources` into the collection below `parent`.
    ///
    /// The returned stream yields one item per input resource, in input
    /// order; rejected resources are reported as items and do not stop the
    /// stream. Input is consumed lazily as the output is polled. The stream
    /// is single-pass.
    pub fn upsert_list<S>(
        &self,
        parent: impl Into<ResourceIdentifier>,
        resources: S,
    ) -> BoxStream<'static, Result<UpsertListItem, ApiError>>
    where
        S: Stream<Item = Resource> + Send + 'static,
    {
        let parent = parent.into();
        if let Err(e) = self.descriptor.check_parent(&parent) {
            return stream::once(future::ready(Err(e))).boxed();
        }

        self.client.upsert_stream_resource_list(
            self.descriptor.collection_uri,
            parent.segments(),
            resources.boxed(),
        )
    }

    /// Owned, collecting variant of [`upsert_list`](Self::upsert_list).
    pub fn upsert_async_list(
        &self,
        parent: impl Into<ResourceIdentifier>,
        resources: Vec<Resource>,
    ) -> BoxFuture<'static, Result<UpsertListResponse, ApiError>> {
        let parent = parent.into();
        if let Err(e) = self.descriptor.check_parent(&parent) {
            return future::ready(Err(e)).boxed();
        }

        self.client.upsert_async_stream_resource_list(
            self.descriptor.collection_uri,
            parent.segments(),
            resources,
        )
    }

    /// Deletes a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for malformed identifiers, or the
    /// error of the request.
    pub async fn delete(&self, id: impl Into<ResourceIdentifier>) -> Result<WriteResult, ApiError> {
        let id = id.into();
        self.descriptor.check_identifier(&id)?;

        self.client
            .delete_resource(self.descriptor.item_uri, id.segments())
            .await
    }

    /// Fetches the page after `page`, if any.
    ///
    /// # Errors
    ///
    /// Returns the error of the request or page factory.
    pub async fn next_page(&self, page: &Page) -> Result<Option<Page>, ApiError> {
        self.follow(page.next_link()).await
    }

    /// Fetches the page before `page`, if any.
    ///
    /// # Errors
    ///
    /// Returns the error of the request or page factory.
    pub async fn previous_page(&self, page: &Page) -> Result<Option<Page>, ApiError> {
        self.follow(page.previous_link()).await
    }

    /// Fetches the first page of the collection `page` belongs to.
    ///
    /// # Errors
    ///
    /// Returns the error of the request or page factory.
    pub async fn first_page(&self, page: &Page) -> Result<Option<Page>, ApiError> {
        self.follow(page.first_link()).await
    }

    async fn follow(&self, link: Option<&str>) -> Result<Option<Page>, ApiError> {
        let Some(link) = link else {
            return Ok(None);
        };
        let data = self.client.get_resources_by_link(link).await?;
        self.page_factory.create_page(data).map(Some)
    }
}
