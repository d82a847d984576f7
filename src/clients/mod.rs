//! HTTP client types for PIM API communication.
//!
//! This module provides the transport layer of the crate: building and
//! sending authenticated requests, retry handling and response parsing,
//! plus the resource-level [`ResourceClient`] built on top of it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`ResourceClient`]: URI-template level operations used by the resource APIs
//! - [`HttpResourceClient`]: The reqwest-backed [`ResourceClient`]
//!
//! # Example
//!
//! ```rust,ignore
//! use pim_api::{PimConfig, BaseUri, AccessToken};
//! use pim_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = PimConfig::builder()
//!     .base_uri(BaseUri::new("https://pim.example.com")?)
//!     .access_token(AccessToken::new("token")?)
//!     .build()?;
//!
//! let client = HttpClient::new(&config)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "api/rest/v1/attributes")
//!     .query_param("limit", "10")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client implements automatic retry logic for transient failures:
//!
//! - **429 (Too Many Requests)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **5xx (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure it
//! through [`PimConfigBuilder::tries`](crate::PimConfigBuilder::tries) or per
//! request with `.tries(n)` on [`HttpRequest::builder`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod resource;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use resource::{HttpResourceClient, ResourceClient};
