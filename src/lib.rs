//! # Drupal API Client
//!
//! An async Rust client for Drupal's JSON:API, decoupled router and GraphQL
//! endpoints, with pluggable authentication, caching, serialization and
//! logging.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the base URL, resource types and view identifiers
//! - Basic, OAuth client-credentials/password and custom authorization via
//!   [`auth`]
//! - Deterministic cache keys and a response cache gateway via [`cache`]
//! - A replaceable transport, defaulting to `reqwest`
//! - [`JsonApiClient`] for collections, resources, views, writes and path lookups
//! - [`RouterClient`] and [`GraphqlClient`] over the same request pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use drupal_api_client::{Authentication, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
//!     .authentication(Authentication::basic("editor", "secret"))
//!     .default_locale("en")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://cms.example.com");
//! ```
//!
//! ## Fetching Resources
//!
//! ```rust,ignore
//! use drupal_api_client::{ClientConfig, JsonApiClient, RequestOptions};
//!
//! let client = JsonApiClient::new(&ClientConfig::new("https://cms.example.com")?);
//!
//! let recipes = client
//!     .get_collection("node--recipe", Some(RequestOptions::new().query_string("page[limit]=5")))
//!     .await?;
//!
//! let recipe = client
//!     .get_resource("node--recipe", "35f7cd32-2c54-49f2-8740-0b0ec2ba61f6", None)
//!     .await?;
//!
//! let front = client.get_resource_by_path("/recipes/deep-mediterranean-quiche", None).await?;
//! ```
//!
//! ## Caching
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use drupal_api_client::{BaseUrl, ClientConfig, JsonApiClient, MemoryCache};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com")?)
//!     .cache(Arc::new(MemoryCache::new()))
//!     .build()?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and configuration validate on construction
//! - **Thread-safe**: All clients are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod auth;
pub mod cache;
pub mod clients;
pub mod config;
pub mod error;
pub mod logging;
pub mod serializer;

// Re-export public types at crate root for convenience
pub use auth::Authentication;
pub use cache::{Cache, MemoryCache};
pub use config::{BaseUrl, ClientConfig, ClientConfigBuilder, ResourceType, ViewId};
pub use error::ConfigError;
pub use logging::{LogLevel, Logger, TracingLogger};
pub use serializer::{Serializer, SerializerError};

// Re-export client types
pub use clients::{
    ApiResponse, ClientError, GraphqlClient, HttpResponse, JsonApiClient, RequestOptions,
    RouterClient, Transport,
};
