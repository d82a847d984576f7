//! A single page of a collection.

use crate::api::Resource;

/// One bounded batch of resources plus its navigation links.
///
/// A page is immutable once built. Following its links is done through
/// [`ResourceApi::next_page`](crate::api::ResourceApi::next_page) and its
/// siblings, or transparently by a cursor.
///
/// # Example
///
/// ```rust
/// use pim_api::Page;
///
/// let page = Page::new(Vec::new())
///     .with_current_page(1)
///     .with_next_link("https://pim.example.com/api/rest/v1/attributes?page=2&limit=10");
///
/// assert!(page.is_empty());
/// assert!(page.has_next_page());
/// assert!(!page.has_previous_page());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    items: Vec<Resource>,
    count: Option<u64>,
    current_page: Option<u64>,
    self_link: Option<String>,
    first_link: Option<String>,
    previous_link: Option<String>,
    next_link: Option<String>,
}

impl Page {
    /// Creates a page holding `items` and no links.
    #[must_use]
    pub const fn new(items: Vec<Resource>) -> Self {
        Self {
            items,
            count: None,
            current_page: None,
            self_link: None,
            first_link: None,
            previous_link: None,
            next_link: None,
        }
    }

    /// Sets the total number of items of the collection.
    #[must_use]
    pub const fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the 1-based number of this page.
    #[must_use]
    pub const fn with_current_page(mut self, current_page: u64) -> Self {
        self.current_page = Some(current_page);
        self
    }

    /// Sets the link to this page.
    #[must_use]
    pub fn with_self_link(mut self, link: impl Into<String>) -> Self {
        self.self_link = Some(link.into());
        self
    }

    /// Sets the link to the first page.
    #[must_use]
    pub fn with_first_link(mut self, link: impl Into<String>) -> Self {
        self.first_link = Some(link.into());
        self
    }

    /// Sets the link to the previous page.
    #[must_use]
    pub fn with_previous_link(mut self, link: impl Into<String>) -> Self {
        self.previous_link = Some(link.into());
        self
    }

    /// Sets the link to the next page.
    #[must_use]
    pub fn with_next_link(mut self, link: impl Into<String>) -> Self {
        self.next_link = Some(link.into());
        self
    }

    /// Returns the resources of this page, in server order.
    #[must_use]
    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    /// Consumes the page, returning its resources.
    #[must_use]
    pub fn into_items(self) -> Vec<Resource> {
        self.items
    }

    /// Returns the number of resources on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of items, when it was requested with `with_count`.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        self.count
    }

    /// Returns the 1-based number of this page, if known.
    #[must_use]
    pub const fn current_page(&self) -> Option<u64> {
        self.current_page
    }

    /// Returns the link to this page.
    #[must_use]
    pub fn self_link(&self) -> Option<&str> {
        self.self_link.as_deref()
    }

    /// Returns the link to the first page.
    #[must_use]
    pub fn first_link(&self) -> Option<&str> {
        self.first_link.as_deref()
    }

    /// Returns the link to the previous page.
    #[must_use]
    pub fn previous_link(&self) -> Option<&str> {
        self.previous_link.as_deref()
    }

    /// Returns the link to the next page.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Returns `true` if a next page exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_link.is_some()
    }

    /// Returns `true` if a previous page exists.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.previous_link.is_some()
    }
}

impl IntoIterator for Page {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_page_has_no_links() {
        let page = Page::new(vec![json!({"code": "a"}).as_object().unwrap().clone()]);

        assert_eq!(page.len(), 1);
        assert!(!page.has_next_page());
        assert!(!page.has_previous_page());
        assert!(page.self_link().is_none());
        assert!(page.first_link().is_none());
        assert!(page.count().is_none());
        assert!(page.current_page().is_none());
    }

    #[test]
    fn test_builders_set_metadata() {
        let page = Page::default()
            .with_count(42)
            .with_current_page(2)
            .with_self_link("self")
            .with_first_link("first")
            .with_previous_link("previous")
            .with_next_link("next");

        assert_eq!(page.count(), Some(42));
        assert_eq!(page.current_page(), Some(2));
        assert_eq!(page.self_link(), Some("self"));
        assert_eq!(page.first_link(), Some("first"));
        assert_eq!(page.previous_link(), Some("previous"));
        assert_eq!(page.next_link(), Some("next"));
    }
}
