//! Payload types shared by the resource layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One domain record, as an ordered map of field names to JSON values.
///
/// The resource layer is schema-agnostic: records are passed through as-is.
pub type Resource = serde_json::Map<String, Value>;

/// Outcome of a create, upsert or delete request.
///
/// The API answers writes with an empty body: `201 Created` with a
/// `Location` header for new resources and `204 No Content` for updates
/// and deletions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteResult {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The URL of the written resource, when the API returned one.
    pub location: Option<String>,
}

impl WriteResult {
    /// Creates a new `WriteResult`.
    #[must_use]
    pub const fn new(status: u16, location: Option<String>) -> Self {
        Self { status, location }
    }

    /// Returns `true` if the request created a new resource.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.status == 201
    }

    /// Returns `true` if the request updated (or deleted) an existing resource.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        self.status == 204
    }
}

impl fmt::Display for WriteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} {location}", self.status),
            None => write!(f, "{}", self.status),
        }
    }
}

/// Result of one record of a bulk upsert.
///
/// Each input record produces exactly one item, in input order. A failed
/// record is reported through `status_code`, `message` and `errors`; it
/// never aborts the rest of the stream.
///
/// # Example
///
/// ```rust
/// use pim_api::UpsertListItem;
///
/// let item: UpsertListItem = serde_json::from_str(
///     r#"{"line":2,"code":"size","status_code":422,"message":"Validation failed.","errors":[]}"#,
/// ).unwrap();
///
/// assert_eq!(item.identifier.as_deref(), Some("size"));
/// assert!(!item.is_success());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpsertListItem {
    /// 1-based position of the record in the input sequence.
    pub line: usize,
    /// Identifier of the record (`code`, or `identifier` for products).
    #[serde(default, alias = "code", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Per-record status: 201 created, 204 updated, 4xx rejected.
    pub status_code: u16,
    /// Error message for rejected records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field errors for rejected records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
}

impl UpsertListItem {
    /// Returns `true` if the record was created or updated.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code <= 299
    }
}

/// The collected results of an asynchronous bulk upsert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpsertListResponse {
    items: Vec<UpsertListItem>,
}

impl UpsertListResponse {
    /// Creates a response from already-ordered items.
    #[must_use]
    pub const fn new(items: Vec<UpsertListItem>) -> Self {
        Self { items }
    }

    /// Returns the items in input order.
    #[must_use]
    pub fn items(&self) -> &[UpsertListItem] {
        &self.items
    }

    /// Returns the number of reported records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no record was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the rejected records.
    pub fn failures(&self) -> impl Iterator<Item = &UpsertListItem> {
        self.items.iter().filter(|item| !item.is_success())
    }
}

impl IntoIterator for UpsertListResponse {
    type Item = UpsertListItem;
    type IntoIter = std::vec::IntoIter<UpsertListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a UpsertListResponse {
    type Item = &'a UpsertListItem;
    type IntoIter = std::slice::Iter<'a, UpsertListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
