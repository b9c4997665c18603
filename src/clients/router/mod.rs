//! Router client for translating paths into entities.
//!
//! # Overview
//!
//! - [`RouterClient`]: Calls the path translation endpoint
//! - [`RouterResponse`]: Either a [`ResolvedPath`] or an [`UnresolvedPath`]
//!
//! The JSON:API client uses this client for
//! [`get_resource_by_path`](crate::JsonApiClient::get_resource_by_path).

mod client;
mod types;

pub use client::RouterClient;
pub use types::{JsonApiTarget, ResolvedPath, RouterEntity, RouterResponse, UnresolvedPath};
