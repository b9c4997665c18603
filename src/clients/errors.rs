//! Error types shared by every client.
//!
//! This module contains the transport-level error produced when the
//! underlying network call fails, request validation errors, and the
//! unified [`ClientError`] returned by every public client operation.
//!
//! # Error Handling
//!
//! Internally the transport layer never panics or propagates a raw transport
//! failure: it returns a [`FetchResult`](crate::clients::FetchResult), whose
//! error side is normalized into a [`ClientError`]. Public operations then hand
//! that error to the caller with `?`.
//!
//! Non-2xx responses are *not* errors. A 404 problem document is returned to
//! the caller like any other body.
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_api_client::{ClientError, JsonApiClient};
//!
//! match client.get_collection("node--recipe", None).await {
//!     Ok(response) => println!("{}", response.json()),
//!     Err(ClientError::Config(e)) => println!("Bad input: {e}"),
//!     Err(ClientError::Authentication(e)) => println!("Auth failed: {e}"),
//!     Err(ClientError::Transport(e)) => println!("Network failure: {e}"),
//!     Err(other) => println!("Other failure: {other}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::oauth::OAuthError;
use crate::error::ConfigError;

/// Message used when a transport failure carries no description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Error raised by the underlying network call.
///
/// Covers DNS failures, refused connections, malformed URLs, aborted
/// requests and anything else the transport function reports. Failures with
/// no message are normalized to `"Unknown error"`.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::clients::TransportError;
///
/// let error = TransportError::new("connection refused");
/// assert_eq!(error.to_string(), "connection refused");
///
/// let error = TransportError::new("");
/// assert_eq!(error.to_string(), "Unknown error");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a transport error from any message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::unknown();
        }
        Self { message }
    }

    /// Creates the generic error used for failures with no description.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            message: UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for every public client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration or call input; raised before any I/O.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The OAuth token endpoint rejected the configured credentials.
    #[error(transparent)]
    Authentication(#[from] OAuthError),

    /// The underlying network call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A response body was not the JSON document it was expected to be.
    #[error("Failed to parse response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured serializer failed.
    #[error("Serializer failed: {0}")]
    Serializer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The router could not resolve a path to a resource.
    #[error("Path '{path}' could not be resolved: {message}")]
    PathNotResolved {
        /// The path that was looked up.
        path: String,
        /// The router's explanation.
        message: String,
    },
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
    assert_send_sync::<ClientError>();
};
