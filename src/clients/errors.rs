//! HTTP-specific error types for the PIM API client.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Resource-level classification (not found, unauthorized, ...) happens in
//! [`ApiError`](crate::ApiError), which wraps these.

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use pim_api::clients::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Resource not found".to_string(),
///     body: json!({"code": 404, "message": "Resource not found"}),
///     retry_after: None,
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Resource not found");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error message, taken from the `message` field of the body when present.
    pub message: String,
    /// The decoded response body (`{}` when empty or not JSON).
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_after: Option<f64>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// This error is raised when a request continues to fail with 429 or 5xx
/// responses after all configured retry attempts have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// An absolute URL does not belong to the configured base URI.
    #[error("Refusing to send a request to '{url}', which is outside of {base_uri}.")]
    ForeignUrl {
        /// The rejected URL.
        url: String,
        /// The configured base URI.
        base_uri: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
