//! Construction of pages from raw list responses.

use serde_json::Value;

use crate::api::ApiError;
use crate::pagination::page::Page;

/// Builds a [`Page`] from the raw envelope returned by
/// [`ResourceClient::get_resources`](crate::clients::ResourceClient::get_resources).
pub trait PageFactory: Send + Sync {
    /// Creates a page from a list response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the envelope cannot be understood.
    fn create_page(&self, data: Value) -> Result<Page, ApiError>;
}

/// [`PageFactory`] for the HAL envelopes of the PIM API.
///
/// ```json
/// {
///   "_links": {
///     "self": {"href": "https://pim.example.com/api/rest/v1/attributes?page=2&limit=10"},
///     "first": {"href": "https://pim.example.com/api/rest/v1/attributes?page=1&limit=10"},
///     "previous": {"href": "https://pim.example.com/api/rest/v1/attributes?page=1&limit=10"},
///     "next": {"href": "https://pim.example.com/api/rest/v1/attributes?page=3&limit=10"}
///   },
///   "current_page": 2,
///   "items_count": 42,
///   "_embedded": {"items": [{"code": "color"}]}
/// }
/// ```
///
/// Missing links, counts and items are treated as absent; `_links` entries
/// of each item are kept as-is.
///
/// # Example
///
/// ```rust
/// use pim_api::{HalPageFactory, PageFactory};
/// use serde_json::json;
///
/// let page = HalPageFactory
///     .create_page(json!({
///         "_links": {"next": {"href": "https://pim.example.com/api/rest/v1/families?page=2"}},
///         "current_page": 1,
///         "_embedded": {"items": [{"code": "shoes"}]}
///     }))
///     .unwrap();
///
/// assert_eq!(page.len(), 1);
/// assert_eq!(page.current_page(), Some(1));
/// assert!(page.has_next_page());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HalPageFactory;

impl HalPageFactory {
    fn link(links: Option<&Value>, name: &str) -> Option<String> {
        links?
            .get(name)?
            .get("href")?
            .as_str()
            .map(str::to_string)
    }
}

impl PageFactory for HalPageFactory {
    fn create_page(&self, data: Value) -> Result<Page, ApiError> {
        let mut envelope = match data {
            Value::Object(envelope) => envelope,
            other => {
                return Err(ApiError::UnexpectedResponse(format!(
                    "expected a page object, got {other}"
                )))
            }
        };

        let items = match envelope
            .get_mut("_embedded")
            .and_then(|embedded| embedded.get_mut("items"))
            .map(Value::take)
        {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(resource) => Ok(resource),
                    other => Err(ApiError::UnexpectedResponse(format!(
                        "expected page items to be objects, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ApiError::UnexpectedResponse(format!(
                    "expected page items to be an array, got {other}"
                )))
            }
        };

        let links = envelope.get("_links");
        let mut page = Page::new(items);
        if let Some(link) = Self::link(links, "self") {
            page = page.with_self_link(link);
        }
        if let Some(link) = Self::link(links, "first") {
            page = page.with_first_link(link);
        }
        if let Some(link) = Self::link(links, "previous") {
            page = page.with_previous_link(link);
        }
        if let Some(link) = Self::link(links, "next") {
            page = page.with_next_link(link);
        }
        if let Some(count) = envelope.get("items_count").and_then(Value::as_u64) {
            page = page.with_count(count);
        }
        if let Some(current) = envelope.get("current_page").and_then(Value::as_u64) {
            page = page.with_current_page(current);
        }

        Ok(page)
    }
}
