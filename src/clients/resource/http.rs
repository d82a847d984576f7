//! reqwest-backed [`ResourceClient`].

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::api::{
    build_path, render_query, ApiError, QueryParameters, Resource, UpsertListItem,
    UpsertListResponse, WriteResult,
};
use crate::clients::resource::bulk::{decode_batch, encode_batch};
use crate::clients::resource::client::ResourceClient;
use crate::clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
};
use crate::config::{PimConfig, MAX_BULK_BATCH_SIZE};

/// Query keys owned by [`ResourceClient::get_resources`].
const RESERVED_QUERY_KEYS: &[&str] = &["limit", "with_count"];

/// [`ResourceClient`] talking to the PIM API over HTTP.
///
/// Cloning is cheap; clones share the connection pool. Owned futures and
/// streams hold such a clone.
///
/// # Example
///
/// ```rust,ignore
/// use pim_api::clients::{HttpResourceClient, ResourceClient};
/// use pim_api::QueryParameters;
///
/// let client = HttpResourceClient::new(&config)?;
/// let attribute = client
///     .get_resource("api/rest/v1/attributes/%s", &["color".to_string()], &QueryParameters::new())
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpResourceClient {
    http_client: HttpClient,
    batch_size: usize,
    tries: u32,
}

// Verify HttpResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpResourceClient>();
};

impl HttpResourceClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: &PimConfig) -> Result<Self, HttpError> {
        Ok(Self::with_http_client(
            HttpClient::new(config)?,
            config.bulk_batch_size(),
            config.tries(),
        ))
    }

    /// Creates a client on top of an existing [`HttpClient`].
    ///
    /// `batch_size` is clamped to `1..=MAX_BULK_BATCH_SIZE` and `tries` to at
    /// least 1.
    #[must_use]
    pub fn with_http_client(http_client: HttpClient, batch_size: usize, tries: u32) -> Self {
        Self {
            http_client,
            batch_size: batch_size.clamp(1, MAX_BULK_BATCH_SIZE),
            tries: tries.max(1),
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the number of resources sent per bulk request.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn builder(&self, method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequest::builder(method, path).tries(self.tries)
    }

    async fn send(&self, builder: HttpRequestBuilder) -> Result<HttpResponse, ApiError> {
        let request = builder.build().map_err(HttpError::from)?;
        Ok(self.http_client.request(request).await?)
    }

    async fn write(
        &self,
        method: HttpMethod,
        path: String,
        body: &Resource,
    ) -> Result<WriteResult, ApiError> {
        let builder = self
            .builder(method, path)
            .json(&Value::Object(body.clone()));
        let response = self.send(builder).await?;
        Ok(WriteResult::new(
            response.code,
            response.location().map(str::to_string),
        ))
    }

    /// Sends one bulk request and returns its items numbered from `offset + 1`.
    async fn upsert_batch(
        &self,
        path: &str,
        batch: &[Resource],
        offset: usize,
    ) -> Result<Vec<UpsertListItem>, ApiError> {
        tracing::debug!(path, size = batch.len(), offset, "Sending bulk upsert batch");

        let builder = self
            .builder(HttpMethod::Patch, path)
            .body(encode_batch(batch)?)
            .body_type(DataType::JsonCollection);
        let response = self.send(builder).await?;

        decode_batch(&response.text, offset)
    }

    fn json_body(response: HttpResponse) -> Result<Value, ApiError> {
        if let Err(reason) = response.json() {
            return Err(ApiError::UnexpectedResponse(reason));
        }
        Ok(response.body)
    }

    fn into_object(body: Value) -> Result<Resource, ApiError> {
        match body {
            Value::Object(resource) => Ok(resource),
            other => Err(ApiError::UnexpectedResponse(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

/// State of a streaming bulk upsert.
struct BulkUpsert {
    client: HttpResourceClient,
    path: String,
    batches: stream::Enumerate<stream::Chunks<BoxStream<'static, Resource>>>,
    pending: VecDeque<UpsertListItem>,
}

impl BulkUpsert {
    /// Yields the next item, reading the next batch only once the previous
    /// one is drained.
    async fn next_item(mut self) -> Result<Option<(UpsertListItem, Self)>, ApiError> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Ok(Some((item, self)));
            }
            let Some((index, batch)) = self.batches.next().await else {
                return Ok(None);
            };
            let offset = index * self.client.batch_size;
            let items = self.client.upsert_batch(&self.path, &batch, offset).await?;
            if items.len() != batch.len() {
                return Err(ApiError::UnexpectedResponse(format!(
                    "bulk response reported {} results for {} records (lines {}..={})",
                    items.len(),
                    batch.len(),
                    offset + 1,
                    offset + batch.len()
                )));
            }
            self.pending.extend(items);
        }
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn get_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        query: &QueryParameters,
    ) -> Result<Resource, ApiError> {
        let path = build_path(uri, uri_parameters)?;
        let builder = self
            .builder(HttpMethod::Get, path)
            .query(render_query(query));
        let response = self.send(builder).await?;

        Self::into_object(Self::json_body(response)?)
    }

    async fn get_resources(
        &self,
        uri: &str,
        uri_parameters: &[String],
        limit: Option<u32>,
        with_count: Option<bool>,
        query: &QueryParameters,
    ) -> Result<Value, ApiError> {
        if let Some(key) = RESERVED_QUERY_KEYS
            .iter()
            .find(|key| query.contains_key(**key))
        {
            return Err(ApiError::invalid_argument(format!(
                "The parameter \"{key}\" should not be defined in the additional query parameters"
            )));
        }

        let path = build_path(uri, uri_parameters)?;
        let mut pairs = Vec::with_capacity(query.len() + 2);
        if let Some(limit) = limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(with_count) = with_count {
            pairs.push(("with_count".to_string(), with_count.to_string()));
        }
        pairs.extend(render_query(query));

        let response = self
            .send(self.builder(HttpMethod::Get, path).query(pairs))
            .await?;
        Self::json_body(response)
    }

    async fn get_resources_by_link(&self, link: &str) -> Result<Value, ApiError> {
        let base_uri = self.http_client.base_uri();
        if !base_uri.owns(link) {
            return Err(ApiError::invalid_argument(format!(
                "Refusing to follow link \"{link}\" outside of {base_uri}"
            )));
        }

        let response = self.send(self.builder(HttpMethod::Get, link)).await?;
        Self::json_body(response)
    }

    async fn create_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        body: &Resource,
    ) -> Result<WriteResult, ApiError> {
        let path = build_path(uri, uri_parameters)?;
        self.write(HttpMethod::Post, path, body).await
    }

    async fn upsert_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        body: &Resource,
    ) -> Result<WriteResult, ApiError> {
        let path = build_path(uri, uri_parameters)?;
        self.write(HttpMethod::Patch, path, body).await
    }

    fn upsert_async_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        body: Resource,
    ) -> BoxFuture<'static, Result<WriteResult, ApiError>> {
        let path = match build_path(uri, uri_parameters) {
            Ok(path) => path,
            Err(e) => return future::ready(Err(e)).boxed(),
        };
        let client = self.clone();

        async move { client.write(HttpMethod::Patch, path, &body).await }.boxed()
    }

    fn upsert_stream_resource_list(
        &self,
        uri: &str,
        uri_parameters: &[String],
        resources: BoxStream<'static, Resource>,
    ) -> BoxStream<'static, Result<UpsertListItem, ApiError>> {
        let path = match build_path(uri, uri_parameters) {
            Ok(path) => path,
            Err(e) => return stream::once(future::ready(Err(e))).boxed(),
        };

        let state = BulkUpsert {
            client: self.clone(),
            path,
            batches: resources.chunks(self.batch_size).enumerate(),
            pending: VecDeque::new(),
        };

        stream::try_unfold(state, BulkUpsert::next_item).boxed()
    }

    fn upsert_async_stream_resource_list(
        &self,
        uri: &str,
        uri_parameters: &[String],
        resources: Vec<Resource>,
    ) -> BoxFuture<'static, Result<UpsertListResponse, ApiError>> {
        let items = self.upsert_stream_resource_list(
            uri,
            uri_parameters,
            stream::iter(resources).boxed(),
        );

        items
            .try_collect::<Vec<_>>()
            .map(|result| result.map(UpsertListResponse::new))
            .boxed()
    }

    async fn delete_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
    ) -> Result<WriteResult, ApiError> {
        let path = build_path(uri, uri_parameters)?;
        let response = self.send(self.builder(HttpMethod::Delete, path)).await?;
        Ok(WriteResult::new(
            response.code,
            response.location().map(str::to_string),
        ))
    }
}
