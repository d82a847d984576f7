//! The resource layer.
//!
//! Every resource type of the PIM API is served by the same generic
//! [`ResourceApi`], configured by a static [`ResourceDescriptor`]:
//!
//! - [`ResourceApi`]: get, list, iterate, create, upsert (single, async and
//!   bulk) and delete operations
//! - [`ResourceDescriptor`]: URI templates and identifier fields of a
//!   resource type, with built-in constants such as [`ATTRIBUTES`]
//! - [`ResourceIdentifier`]: the path segments addressing a resource
//! - [`ListParams`] / [`QueryParameters`]: list and query options
//! - [`Resource`], [`WriteResult`], [`UpsertListItem`],
//!   [`UpsertListResponse`]: payloads
//! - [`ApiError`]: the error type of every operation

mod descriptor;
mod errors;
mod identifier;
mod model;
mod path;
mod query;
mod resource_api;

pub use descriptor::{
    ResourceDescriptor, ASSOCIATION_TYPES, ATTRIBUTES, ATTRIBUTE_GROUPS, ATTRIBUTE_OPTIONS,
    BUILT_IN, CATEGORIES, CHANNELS, FAMILIES, PRODUCTS,
};
pub use errors::ApiError;
pub use identifier::ResourceIdentifier;
pub use model::{Resource, UpsertListItem, UpsertListResponse, WriteResult};
pub use path::{build_path, placeholder_count, PLACEHOLDER};
pub use query::{render_query, ListParams, QueryParameters, QueryValue, DEFAULT_PAGE_SIZE};
pub use resource_api::ResourceApi;
