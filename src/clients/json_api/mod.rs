//! JSON:API client.
//!
//! # Overview
//!
//! - [`JsonApiClient`]: Collections, resources, views, writes and path lookups
//! - [`JsonApiIndex`]: The index document used by index-lookup mode
//! - [`RequestBody`]: Body of a create or update call
//! - [`DeleteResponse`]: Outcome of a delete call
//!
//! # Resource Types
//!
//! Resources are addressed by `entityType--bundle` identifiers such as
//! `node--recipe`. Malformed identifiers are rejected before any request is
//! sent.
//!
//! # Caching
//!
//! With a cache configured, reads are served from it when possible.
//! Responses with status 400 or above are returned but never cached.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use drupal_api_client::{BaseUrl, ClientConfig, JsonApiClient};
//! use drupal_api_client::cache::MemoryCache;
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com")?)
//!     .cache(Arc::new(MemoryCache::new()))
//!     .build()?;
//! let client = JsonApiClient::new(&config);
//!
//! // The second call is answered from the cache
//! client.get_resource("node--recipe", "35f7cd32", None).await?;
//! client.get_resource("node--recipe", "35f7cd32", None).await?;
//! ```

mod client;
mod types;

pub use client::{JsonApiClient, INDEX_KEY_PREFIX, JSON_API_MEDIA_TYPE};
pub use types::{DeleteResponse, JsonApiIndex, Link, RequestBody};
