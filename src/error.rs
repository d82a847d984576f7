//! Error types for client configuration.
//!
//! This module contains the error type returned while building a
//! [`PimConfig`](crate::PimConfig) and its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use pim_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid API access token.")]
    EmptyAccessToken,

    /// Base URI is invalid.
    #[error("Invalid base URI '{uri}'. Please provide a URL with scheme (e.g., 'https://pim.example.com').")]
    InvalidBaseUri {
        /// The invalid URI that was provided.
        uri: String,
    },

    /// Bulk batch size is out of range.
    #[error("Invalid bulk batch size {size}. Expected a value between 1 and {max}.")]
    InvalidBatchSize {
        /// The rejected batch size.
        size: usize,
        /// The largest accepted batch size.
        max: usize,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
