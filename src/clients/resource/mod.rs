//! Resource-level transport.
//!
//! [`ResourceClient`] is the seam between the generic
//! [`ResourceApi`](crate::api::ResourceApi) and the wire. It speaks in URI
//! templates, raw JSON envelopes and [`ApiError`](crate::ApiError)s;
//! [`HttpResourceClient`] implements it on top of [`HttpClient`](crate::clients::HttpClient).

mod bulk;
mod client;
mod http;

pub use client::ResourceClient;
pub use http::HttpResourceClient;
