//! The entry point of the crate.

use std::sync::Arc;

use crate::api::{
    ResourceApi, ResourceDescriptor, ASSOCIATION_TYPES, ATTRIBUTES, ATTRIBUTE_GROUPS,
    ATTRIBUTE_OPTIONS, CATEGORIES, CHANNELS, FAMILIES, PRODUCTS,
};
use crate::clients::{HttpError, HttpResourceClient};
use crate::config::PimConfig;
use crate::pagination::{HalPageFactory, ResourceCursor, ResourceCursorFactory};

/// Cursor returned by the `all` operation of an [`HttpResourceApi`].
pub type HttpResourceCursor = ResourceCursor<HttpResourceClient, HalPageFactory>;

/// A [`ResourceApi`] wired to the HTTP transport.
pub type HttpResourceApi = ResourceApi<
    HttpResourceClient,
    HalPageFactory,
    ResourceCursorFactory<HttpResourceClient, HalPageFactory>,
>;

/// Client for the PIM REST API.
///
/// Hands out one [`HttpResourceApi`] per resource type. All of them share the
/// same connection pool; creating them is cheap.
///
/// # Example
///
/// ```rust,ignore
/// use pim_api::{AccessToken, BaseUri, ListParams, PimClient, PimConfig};
///
/// let config = PimConfig::builder()
///     .base_uri(BaseUri::new("https://pim.example.com")?)
///     .access_token(AccessToken::new(token)?)
///     .build()?;
/// let client = PimClient::new(&config)?;
///
/// let color = client.attributes().get("color").await?;
/// let options = client
///     .attribute_options()
///     .list_per_page("color", ListParams::default())
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct PimClient {
    resource_client: Arc<HttpResourceClient>,
    page_factory: Arc<HalPageFactory>,
}

// Verify PimClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PimClient>();
    assert_send_sync::<HttpResourceApi>();
    assert_send_sync::<HttpResourceCursor>();
};

impl PimClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: &PimConfig) -> Result<Self, HttpError> {
        Ok(Self::with_resource_client(HttpResourceClient::new(config)?))
    }

    /// Creates a client on top of an existing resource client.
    #[must_use]
    pub fn with_resource_client(resource_client: HttpResourceClient) -> Self {
        Self {
            resource_client: Arc::new(resource_client),
            page_factory: Arc::new(HalPageFactory),
        }
    }

    /// Returns the shared resource client.
    #[must_use]
    pub const fn resource_client(&self) -> &Arc<HttpResourceClient> {
        &self.resource_client
    }

    /// Returns the API of any resource type.
    #[must_use]
    pub fn resource(&self, descriptor: &'static ResourceDescriptor) -> HttpResourceApi {
        ResourceApi::new(
            descriptor,
            Arc::clone(&self.resource_client),
            Arc::clone(&self.page_factory),
            ResourceCursorFactory::new(
                Arc::clone(&self.resource_client),
                Arc::clone(&self.page_factory),
            ),
        )
    }

    /// Attributes.
    #[must_use]
    pub fn attributes(&self) -> HttpResourceApi {
        self.resource(&ATTRIBUTES)
    }

    /// Options of select attributes, below their attribute code.
    #[must_use]
    pub fn attribute_options(&self) -> HttpResourceApi {
        self.resource(&ATTRIBUTE_OPTIONS)
    }

    /// Attribute groups.
    #[must_use]
    pub fn attribute_groups(&self) -> HttpResourceApi {
        self.resource(&ATTRIBUTE_GROUPS)
    }

    /// Families.
    #[must_use]
    pub fn families(&self) -> HttpResourceApi {
        self.resource(&FAMILIES)
    }

    /// Categories.
    #[must_use]
    pub fn categories(&self) -> HttpResourceApi {
        self.resource(&CATEGORIES)
    }

    /// Channels.
    #[must_use]
    pub fn channels(&self) -> HttpResourceApi {
        self.resource(&CHANNELS)
    }

    /// Association types.
    #[must_use]
    pub fn association_types(&self) -> HttpResourceApi {
        self.resource(&ASSOCIATION_TYPES)
    }

    /// Products, identified by `identifier`.
    #[must_use]
    pub fn products(&self) -> HttpResourceApi {
        self.resource(&PRODUCTS)
    }
}
