//! Resource identifiers.

use std::fmt;

/// The path segments addressing one resource, or the parent of a collection.
///
/// Top-level collections have an empty parent, written
/// [`ResourceIdentifier::root()`] or `()`. Nested resources are addressed by
/// several segments, e.g. an attribute option by `("color", "red")`.
///
/// # Example
///
/// ```rust
/// use pim_api::ResourceIdentifier;
///
/// let option = ResourceIdentifier::from(("color", "red"));
/// assert_eq!(option.segments(), ["color", "red"]);
/// assert_eq!(option.parent().segments(), ["color"]);
/// assert_eq!(option.to_string(), "color/red");
///
/// assert!(ResourceIdentifier::from(()).is_root());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier(Vec<String>);

impl ResourceIdentifier {
    /// Creates an identifier from its segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the empty identifier of top-level collections.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if this is the root identifier.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the identifier without its last segment.
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    /// Returns the last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns `true` if any segment is empty.
    #[must_use]
    pub fn has_empty_segment(&self) -> bool {
        self.0.iter().any(|segment| segment.trim().is_empty())
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl From<()> for ResourceIdentifier {
    fn from((): ()) -> Self {
        Self::root()
    }
}

impl From<&str> for ResourceIdentifier {
    fn from(segment: &str) -> Self {
        Self(vec![segment.to_string()])
    }
}

impl From<String> for ResourceIdentifier {
    fn from(segment: String) -> Self {
        Self(vec![segment])
    }
}

impl From<&String> for ResourceIdentifier {
    fn from(segment: &String) -> Self {
        Self(vec![segment.clone()])
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for ResourceIdentifier {
    fn from((parent, child): (A, B)) -> Self {
        Self(vec![parent.into(), child.into()])
    }
}

impl<const N: usize> From<[&str; N]> for ResourceIdentifier {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl From<Vec<String>> for ResourceIdentifier {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}
