//! Configuration types for the PIM API client.
//!
//! This module provides the configuration used to reach a PIM instance.
//!
//! # Overview
//!
//! - [`PimConfig`]: The configuration struct holding all client settings
//! - [`PimConfigBuilder`]: A builder for constructing [`PimConfig`] instances
//! - [`AccessToken`]: A validated bearer token with masked debug output
//! - [`BaseUri`]: A validated base URI of the PIM instance
//!
//! # Example
//!
//! ```rust
//! use pim_api::{PimConfig, AccessToken, BaseUri};
//!
//! let config = PimConfig::builder()
//!     .base_uri(BaseUri::new("https://pim.example.com").unwrap())
//!     .access_token(AccessToken::new("token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.bulk_batch_size(), 100);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUri};

use crate::error::ConfigError;

/// Largest number of records the API accepts in one bulk upsert request.
pub const MAX_BULK_BATCH_SIZE: usize = 100;

/// Configuration for the PIM API client.
///
/// # Thread Safety
///
/// `PimConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct PimConfig {
    base_uri: BaseUri,
    access_token: AccessToken,
    user_agent_prefix: Option<String>,
    tries: u32,
    bulk_batch_size: usize,
}

impl PimConfig {
    /// Creates a new builder for constructing a `PimConfig`.
    #[must_use]
    pub fn builder() -> PimConfigBuilder {
        PimConfigBuilder::new()
    }

    /// Returns the base URI of the PIM instance.
    #[must_use]
    pub const fn base_uri(&self) -> &BaseUri {
        &self.base_uri
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted on 429/5xx responses.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns how many records are sent per bulk upsert request.
    #[must_use]
    pub const fn bulk_batch_size(&self) -> usize {
        self.bulk_batch_size
    }
}

// Verify PimConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PimConfig>();
};

/// Builder for constructing [`PimConfig`] instances.
///
/// Required fields are `base_uri` and `access_token`.
///
/// # Defaults
///
/// - `tries`: `1` (no automatic retries)
/// - `bulk_batch_size`: [`MAX_BULK_BATCH_SIZE`]
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use pim_api::{PimConfig, AccessToken, BaseUri};
///
/// let config = PimConfig::builder()
///     .base_uri(BaseUri::new("https://pim.example.com").unwrap())
///     .access_token(AccessToken::new("token").unwrap())
///     .user_agent_prefix("MyConnector/1.0")
///     .tries(3)
///     .bulk_batch_size(50)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tries(), 3);
/// ```
#[derive(Debug, Default)]
pub struct PimConfigBuilder {
    base_uri: Option<BaseUri>,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
    bulk_batch_size: Option<usize>,
}

impl PimConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI (required).
    #[must_use]
    pub fn base_uri(mut self, uri: BaseUri) -> Self {
        self.base_uri = Some(uri);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of times a request is attempted.
    ///
    /// Values above 1 enable automatic retries for 429 and 5xx responses.
    /// A value of 0 is treated as 1.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets how many records are sent per bulk upsert request.
    #[must_use]
    pub const fn bulk_batch_size(mut self, size: usize) -> Self {
        self.bulk_batch_size = Some(size);
        self
    }

    /// Builds the [`PimConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_uri` or
    /// `access_token` are not set, and [`ConfigError::InvalidBatchSize`]
    /// if the bulk batch size is 0 or above [`MAX_BULK_BATCH_SIZE`].
    pub fn build(self) -> Result<PimConfig, ConfigError> {
        let base_uri = self
            .base_uri
            .ok_or(ConfigError::MissingRequiredField { field: "base_uri" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        let bulk_batch_size = self.bulk_batch_size.unwrap_or(MAX_BULK_BATCH_SIZE);
        if bulk_batch_size == 0 || bulk_batch_size > MAX_BULK_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize {
                size: bulk_batch_size,
                max: MAX_BULK_BATCH_SIZE,
            });
        }

        Ok(PimConfig {
            base_uri,
            access_token,
            user_agent_prefix: self.user_agent_prefix,
            tries: self.tries.unwrap_or(1).max(1),
            bulk_batch_size,
        })
    }
}
