//! Static descriptions of resource types.
//!
//! A [`ResourceDescriptor`] tells a [`ResourceApi`](crate::api::ResourceApi)
//! where a resource type lives and which fields identify it. Adding a
//! resource type to the client is a matter of declaring one more constant.
//!
//! # Example
//!
//! ```rust
//! use pim_api::api::ResourceDescriptor;
//!
//! const REFERENCE_ENTITIES: ResourceDescriptor = ResourceDescriptor::new(
//!     "reference entity",
//!     "api/rest/v1/reference-entities",
//!     "api/rest/v1/reference-entities/%s",
//!     &["code"],
//! );
//!
//! assert_eq!(REFERENCE_ENTITIES.parent_len(), 0);
//! assert!(REFERENCE_ENTITIES.is_valid());
//! ```

use crate::api::errors::ApiError;
use crate::api::identifier::ResourceIdentifier;
use crate::api::path::placeholder_count;

/// URIs and identifier fields of one resource type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Human-readable name, used in log events.
    pub name: &'static str,
    /// URI template of the collection, with one `%s` per parent segment.
    pub collection_uri: &'static str,
    /// URI template of a single resource, with one `%s` per identifier field.
    pub item_uri: &'static str,
    /// Payload fields holding the identifier segments, outermost first.
    ///
    /// These fields are reserved: `create` rejects payloads that set them
    /// and injects them from the identifier instead.
    pub identifier_fields: &'static [&'static str],
}

impl ResourceDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        collection_uri: &'static str,
        item_uri: &'static str,
        identifier_fields: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            collection_uri,
            item_uri,
            identifier_fields,
        }
    }

    /// Returns the number of segments identifying a single resource.
    #[must_use]
    pub const fn identifier_len(&self) -> usize {
        self.identifier_fields.len()
    }

    /// Returns the number of segments identifying the parent collection.
    #[must_use]
    pub const fn parent_len(&self) -> usize {
        self.identifier_fields.len().saturating_sub(1)
    }

    /// Returns `true` if the URI templates agree with the identifier fields.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.identifier_fields.is_empty()
            && placeholder_count(self.item_uri) == self.identifier_len()
            && placeholder_count(self.collection_uri) == self.parent_len()
    }

    /// Validates the identifier of a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if a segment is empty or the
    /// segment count does not match [`identifier_fields`](Self::identifier_fields).
    pub fn check_identifier(&self, id: &ResourceIdentifier) -> Result<(), ApiError> {
        if id.len() != self.identifier_len() {
            return Err(ApiError::invalid_argument(format!(
                "A {} is identified by {} ({} segment(s)), got \"{id}\"",
                self.name,
                self.identifier_fields.join(", "),
                self.identifier_len()
            )));
        }
        Self::check_segments(id)
    }

    /// Validates the identifier of a parent collection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if a segment is empty or the
    /// segment count does not match [`parent_len`](Self::parent_len).
    pub fn check_parent(&self, parent: &ResourceIdentifier) -> Result<(), ApiError> {
        if parent.len() != self.parent_len() {
            return Err(ApiError::invalid_argument(format!(
                "The {} collection expects {} parent segment(s), got \"{parent}\"",
                self.name,
                self.parent_len()
            )));
        }
        Self::check_segments(parent)
    }

    fn check_segments(id: &ResourceIdentifier) -> Result<(), ApiError> {
        if id.has_empty_segment() {
            return Err(ApiError::invalid_argument(format!(
                "Identifier segments must not be empty, got \"{id}\""
            )));
        }
        Ok(())
    }
}

/// Attributes, identified by `code`.
pub const ATTRIBUTES: ResourceDescriptor = ResourceDescriptor::new(
    "attribute",
    "api/rest/v1/attributes",
    "api/rest/v1/attributes/%s",
    &["code"],
);

/// Options of select attributes, identified by attribute code and option code.
pub const ATTRIBUTE_OPTIONS: ResourceDescriptor = ResourceDescriptor::new(
    "attribute option",
    "api/rest/v1/attributes/%s/options",
    "api/rest/v1/attributes/%s/options/%s",
    &["attribute", "code"],
);

/// Attribute groups, identified by `code`.
pub const ATTRIBUTE_GROUPS: ResourceDescriptor = ResourceDescriptor::new(
    "attribute group",
    "api/rest/v1/attribute-groups",
    "api/rest/v1/attribute-groups/%s",
    &["code"],
);

/// Families, identified by `code`.
pub const FAMILIES: ResourceDescriptor = ResourceDescriptor::new(
    "family",
    "api/rest/v1/families",
    "api/rest/v1/families/%s",
    &["code"],
);

/// Categories, identified by `code`.
pub const CATEGORIES: ResourceDescriptor = ResourceDescriptor::new(
    "category",
    "api/rest/v1/categories",
    "api/rest/v1/categories/%s",
    &["code"],
);

/// Channels, identified by `code`.
pub const CHANNELS: ResourceDescriptor = ResourceDescriptor::new(
    "channel",
    "api/rest/v1/channels",
    "api/rest/v1/channels/%s",
    &["code"],
);

/// Association types, identified by `code`.
pub const ASSOCIATION_TYPES: ResourceDescriptor = ResourceDescriptor::new(
    "association type",
    "api/rest/v1/association-types",
    "api/rest/v1/association-types/%s",
    &["code"],
);

/// Products, identified by `identifier`.
pub const PRODUCTS: ResourceDescriptor = ResourceDescriptor::new(
    "product",
    "api/rest/v1/products",
    "api/rest/v1/products/%s",
    &["identifier"],
);

/// Every built-in descriptor.
pub const BUILT_IN: &[&ResourceDescriptor] = &[
    &ATTRIBUTES,
    &ATTRIBUTE_OPTIONS,
    &ATTRIBUTE_GROUPS,
    &FAMILIES,
    &CATEGORIES,
    &CHANNELS,
    &ASSOCIATION_TYPES,
    &PRODUCTS,
];
