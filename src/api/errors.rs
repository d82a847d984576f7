//! Error types for resource operations.
//!
//! [`ApiError`] is the single error type returned by the resource layer.
//! Caller-side contract violations are reported as
//! [`ApiError::InvalidArgument`] before any request is sent. Everything else
//! is classified from the HTTP status code of the response:
//!
//! - **400**: [`ApiError::BadRequest`]
//! - **401**: [`ApiError::Unauthorized`]
//! - **404**: [`ApiError::NotFound`]
//! - **405**: [`ApiError::MethodNotAllowed`]
//! - **409**: [`ApiError::Conflict`]
//! - **422**: [`ApiError::UnprocessableEntity`] with the field errors
//! - **429**: [`ApiError::TooManyRequests`]
//! - **Other 4xx/5xx**: [`ApiError::Client`] / [`ApiError::Server`]
//! - **Transport**: [`ApiError::Http`]
//!
//! # Example
//!
//! ```rust,ignore
//! use pim_api::ApiError;
//!
//! match client.attributes().get("color").await {
//!     Ok(attribute) => println!("Found: {}", attribute["code"]),
//!     Err(ApiError::NotFound { message }) => println!("{message}"),
//!     Err(ApiError::UnprocessableEntity { message, errors }) => {
//!         println!("{message}: {} field errors", errors.len());
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError};

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller supplied conflicting or malformed arguments.
    ///
    /// Always detected locally, before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request was malformed (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// The message reported by the API.
        message: String,
    },

    /// The access token is missing, invalid or expired (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// The message reported by the API.
        message: String,
    },

    /// The resource does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound {
        /// The message reported by the API.
        message: String,
    },

    /// The resource does not support this operation (HTTP 405).
    #[error("Method not allowed: {message}")]
    MethodNotAllowed {
        /// The message reported by the API.
        message: String,
    },

    /// The request conflicts with the current state of the resource (HTTP 409).
    #[error("Conflict: {message}")]
    Conflict {
        /// The message reported by the API.
        message: String,
    },

    /// The API rejected the payload (HTTP 422).
    #[error("Unprocessable entity: {message}")]
    UnprocessableEntity {
        /// The message reported by the API.
        message: String,
        /// The field errors, as reported under the `errors` key.
        errors: Vec<Value>,
    },

    /// The rate limit was hit (HTTP 429).
    #[error("Too many requests: {message}")]
    TooManyRequests {
        /// The message reported by the API.
        message: String,
        /// Seconds to wait before retrying, when the API says so.
        retry_after: Option<f64>,
    },

    /// Any other 4xx response.
    #[error("Client error {status}: {message}")]
    Client {
        /// The HTTP status code.
        status: u16,
        /// The message reported by the API.
        message: String,
    },

    /// A 5xx response.
    #[error("Server error {status}: {message}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The message reported by the API.
        message: String,
    },

    /// A transport-level error (network, retries exhausted, invalid request).
    #[error(transparent)]
    Http(HttpError),

    /// A payload could not be encoded or decoded.
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with a document of an unexpected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Classifies a non-2xx response into a semantic variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pim_api::ApiError;
    /// use pim_api::clients::HttpResponseError;
    /// use serde_json::json;
    ///
    /// let error = ApiError::from_response_error(HttpResponseError {
    ///     code: 404,
    ///     message: "Resource `foo` does not exist.".to_string(),
    ///     body: json!({"code": 404, "message": "Resource `foo` does not exist."}),
    ///     retry_after: None,
    /// });
    /// assert!(matches!(error, ApiError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_response_error(error: HttpResponseError) -> Self {
        let HttpResponseError {
            code,
            message,
            body,
            retry_after,
        } = error;

        match code {
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            404 => Self::NotFound { message },
            405 => Self::MethodNotAllowed { message },
            409 => Self::Conflict { message },
            422 => Self::UnprocessableEntity {
                message,
                errors: parse_field_errors(&body),
            },
            429 => Self::TooManyRequests {
                message,
                retry_after,
            },
            500..=599 => Self::Server {
                status: code,
                message,
            },
            _ => Self::Client {
                status: code,
                message,
            },
        }
    }

    /// Returns the HTTP status code behind this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::MethodNotAllowed { .. } => Some(405),
            Self::Conflict { .. } => Some(409),
            Self::UnprocessableEntity { .. } => Some(422),
            Self::TooManyRequests { .. } => Some(429),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Http(HttpError::MaxRetries(e)) => Some(e.code),
            _ => None,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(response) => Self::from_response_error(response),
            other => Self::Http(other),
        }
    }
}

/// Extracts the `errors` array of a 422 body.
///
/// The API reports validation errors as:
/// ```json
/// {
///   "code": 422,
///   "message": "Validation failed.",
///   "errors": [{"property": "labels", "message": "The value en_US is not valid."}]
/// }
/// ```
fn parse_field_errors(body: &Value) -> Vec<Value> {
    match body.get("errors") {
        Some(Value::Array(errors)) => errors.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
