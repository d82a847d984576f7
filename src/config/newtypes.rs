//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated API access token.
///
/// This newtype ensures the token is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)` instead of the actual value.
///
/// # Example
///
/// ```rust
/// use pim_api::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// assert_eq!(token.as_ref(), "my-token");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated base URI of a PIM instance.
///
/// The URI must use the `http` or `https` scheme and contain a host.
/// Trailing slashes are stripped so paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use pim_api::BaseUri;
///
/// let uri = BaseUri::new("https://pim.example.com/").unwrap();
/// assert_eq!(uri.as_ref(), "https://pim.example.com");
/// assert_eq!(uri.host(), "pim.example.com");
///
/// assert!(BaseUri::new("pim.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUri {
    uri: String,
    host_start: usize,
}

impl BaseUri {
    /// Creates a new validated base URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUri`] if the scheme is not `http`
    /// or `https`, or if the host is missing.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into();
        let trimmed = uri.trim().trim_end_matches('/');

        let host_start = if trimmed.starts_with("https://") {
            "https://".len()
        } else if trimmed.starts_with("http://") {
            "http://".len()
        } else {
            return Err(ConfigError::InvalidBaseUri { uri });
        };

        let host = &trimmed[host_start..];
        if host.is_empty() || host.contains(char::is_whitespace) || host.contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUri { uri });
        }

        Ok(Self {
            uri: trimmed.to_string(),
            host_start,
        })
    }

    /// Returns the host portion of the URI (including port and any path prefix).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.uri[self.host_start..]
    }

    /// Returns `true` if `url` points below this base URI.
    ///
    /// Used to make sure the access token is only ever sent to the
    /// configured instance when following pagination links.
    #[must_use]
    pub fn owns(&self, url: &str) -> bool {
        url.strip_prefix(self.uri.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']))
    }
}

impl AsRef<str> for BaseUri {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}
