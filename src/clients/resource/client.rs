//! The transport contract of the resource layer.

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::api::{
    ApiError, QueryParameters, Resource, UpsertListItem, UpsertListResponse, WriteResult,
};

/// Performs the HTTP calls behind a [`ResourceApi`](crate::api::ResourceApi).
///
/// URIs are templates with `%s` placeholders; `uri_parameters` fills them
/// in order. Implementations classify error responses into [`ApiError`]
/// and never retry beyond what their configuration asks for. A successful
/// read whose body is empty or not JSON is an
/// [`ApiError::UnexpectedResponse`], never an empty result.
///
/// The `async` methods borrow their arguments. The `upsert_async_*` and
/// `upsert_stream_*` methods instead return owned `'static` futures and
/// streams: nothing runs until the caller polls them, and dropping them
/// cancels any request in flight.
///
/// [`HttpResourceClient`](crate::clients::HttpResourceClient) is the
/// reqwest-backed implementation.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetches a single resource.
    async fn get_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        query: &QueryParameters,
    ) -> Result<Resource, ApiError>;

    /// Fetches one page of a collection, returned as the raw envelope.
    ///
    /// `limit` and `with_count` are sent only when `Some`. Setting either
    /// of them through `query` is an [`ApiError::InvalidArgument`].
    async fn get_resources(
        &self,
        uri: &str,
        uri_parameters: &[String],
        limit: Option<u32>,
        with_count: Option<bool>,
        query: &QueryParameters,
    ) -> Result<Value, ApiError>;

    /// Fetches the page behind a pagination link.
    async fn get_resources_by_link(&self, link: &str) -> Result<Value, ApiError>;

    /// Creates a resource in a collection (`POST`).
    async fn create_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        body: &Resource,
    ) -> Result<WriteResult, ApiError>;

    /// Creates or updates a single resource (`PATCH`).
    async fn upsert_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        body: &Resource,
    ) -> Result<WriteResult, ApiError>;

    /// Owned variant of [`upsert_resource`](Self::upsert_resource).
    fn upsert_async_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
        body: Resource,
    ) -> BoxFuture<'static, Result<WriteResult, ApiError>>;

    /// Creates or updates many resources of a collection.
    ///
    /// Yields exactly one item per input resource, in input order. A
    /// rejected resource is a regular item carrying its status code; a
    /// request that fails as a whole, or whose response does not report
    /// every record it carried, yields one error and ends the stream.
    /// The stream is single-pass.
    fn upsert_stream_resource_list(
        &self,
        uri: &str,
        uri_parameters: &[String],
        resources: BoxStream<'static, Resource>,
    ) -> BoxStream<'static, Result<UpsertListItem, ApiError>>;

    /// Collecting variant of
    /// [`upsert_stream_resource_list`](Self::upsert_stream_resource_list).
    fn upsert_async_stream_resource_list(
        &self,
        uri: &str,
        uri_parameters: &[String],
        resources: Vec<Resource>,
    ) -> BoxFuture<'static, Result<UpsertListResponse, ApiError>>;

    /// Deletes a single resource (`DELETE`).
    async fn delete_resource(
        &self,
        uri: &str,
        uri_parameters: &[String],
    ) -> Result<WriteResult, ApiError>;
}
