//! # PIM API Rust Client
//!
//! A Rust client for the REST API of a product information management (PIM)
//! system: attributes, attribute options, families, categories, products and
//! the other catalog resources.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`PimConfig`] and [`PimConfigBuilder`]
//! - One generic [`ResourceApi`] per resource type, configured by a static
//!   [`ResourceDescriptor`]
//! - Single-page listing ([`Page`]) and lazy iteration over every page
//!   ([`ResourceCursor`])
//! - Single, owned-future and streaming bulk upserts with per-record results
//! - Async HTTP client with optional retry on rate limits and server errors
//!
//! Access tokens are obtained out of band; the client sends them as bearer
//! tokens.
//!
//! ## Quick Start
//!
//! ```rust
//! use pim_api::{AccessToken, BaseUri, PimConfig};
//!
//! let config = PimConfig::builder()
//!     .base_uri(BaseUri::new("https://pim.example.com").unwrap())
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .user_agent_prefix("MyConnector/1.0")
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.bulk_batch_size(), 100);
//! ```
//!
//! ## Reading Resources
//!
//! ```rust,ignore
//! use pim_api::{ListParams, PimClient, QueryParameters};
//!
//! let client = PimClient::new(&config)?;
//!
//! // A single attribute
//! let color = client.attributes().get("color").await?;
//!
//! // One page of attributes, with the total count
//! let page = client
//!     .attributes()
//!     .list_per_page((), ListParams::default().limit(50).with_count(true))
//!     .await?;
//! println!("{} attributes", page.count().unwrap_or_default());
//!
//! // Every option of "color", fetched lazily
//! let mut cursor = client
//!     .attribute_options()
//!     .all("color", 100, QueryParameters::new())
//!     .await?;
//! while let Some(option) = cursor.next().await? {
//!     println!("{}", option["code"]);
//! }
//! ```
//!
//! ## Writing Resources
//!
//! ```rust,ignore
//! use futures::{stream, StreamExt};
//! use serde_json::json;
//!
//! let attributes = client.attributes();
//!
//! // POST; "code" is injected and must not be part of the payload
//! let data = json!({"type": "pim_catalog_simpleselect", "group": "marketing"});
//! attributes.create("color", data.as_object().unwrap().clone()).await?;
//!
//! // PATCH, as an owned future that can be spawned
//! let update = attributes.upsert_async("color", json!({"sort_order": 2}).as_object().unwrap().clone());
//! tokio::spawn(update).await??;
//!
//! // Bulk PATCH, one result per record
//! let mut results = attributes.upsert_list((), stream::iter(records));
//! while let Some(item) = results.next().await {
//!     let item = item?;
//!     if !item.is_success() {
//!         eprintln!("line {}: {:?}", item.line, item.message);
//!     }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Configuration newtypes and identifiers are
//!   validated before any request is sent
//! - **Thread-safe**: All clients and APIs are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Explicit execution**: Async operations return owned futures and
//!   streams; nothing is spawned behind the caller's back

pub mod api;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod pagination;

// Re-export public types at crate root for convenience
pub use api::{
    ApiError, ListParams, QueryParameters, QueryValue, Resource, ResourceApi,
    ResourceDescriptor, ResourceIdentifier, UpsertListItem, UpsertListResponse, WriteResult,
};
pub use client::{HttpResourceApi, HttpResourceCursor, PimClient};
pub use config::{AccessToken, BaseUri, PimConfig, PimConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResourceClient,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    ResourceClient,
};

// Re-export pagination types
pub use pagination::{
    CursorFactory, HalPageFactory, Page, PageFactory, ResourceCursor, ResourceCursorFactory,
};
