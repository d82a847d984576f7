//! URI template expansion.
//!
//! Resource URIs are templates with `%s` placeholders, filled in order with
//! the percent-encoded segments of a [`ResourceIdentifier`](crate::ResourceIdentifier).
//!
//! # Example
//!
//! ```rust
//! use pim_api::api::build_path;
//!
//! let path = build_path("api/rest/v1/attributes/%s/options/%s", &["color", "dark red"]).unwrap();
//! assert_eq!(path, "api/rest/v1/attributes/color/options/dark%20red");
//!
//! assert!(build_path("api/rest/v1/attributes/%s", &[] as &[&str]).is_err());
//! ```

use crate::api::errors::ApiError;

/// The placeholder substituted by [`build_path`].
pub const PLACEHOLDER: &str = "%s";

/// Returns the number of placeholders in a URI template.
#[must_use]
pub fn placeholder_count(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Builds a path by filling the placeholders of `template` in order.
///
/// # Errors
///
/// Returns [`ApiError::InvalidArgument`] if the number of segments does not
/// match the number of placeholders.
pub fn build_path<S: AsRef<str>>(template: &str, segments: &[S]) -> Result<String, ApiError> {
    let expected = placeholder_count(template);
    if expected != segments.len() {
        return Err(ApiError::invalid_argument(format!(
            "URI \"{template}\" expects {expected} parameter(s), got {}",
            segments.len()
        )));
    }

    let mut parts = template.split(PLACEHOLDER);
    let mut result = String::with_capacity(template.len());
    if let Some(head) = parts.next() {
        result.push_str(head);
    }
    for (part, segment) in parts.zip(segments) {
        result.push_str(&urlencoding::encode(segment.as_ref()));
        result.push_str(part);
    }

    Ok(result)
}
