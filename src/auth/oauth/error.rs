//! OAuth-specific error types.
//!
//! These errors are produced while acquiring a token from the
//! `/oauth/token` endpoint.
//!
//! # Error Types
//!
//! - [`OAuthError::AuthenticationFailed`]: The token endpoint returned a non-2xx status
//! - [`OAuthError::InvalidTokenResponse`]: The token endpoint returned an unusable body
//! - [`OAuthError::Transport`]: The token request never got a response
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::auth::oauth::OAuthError;
//!
//! let error = OAuthError::AuthenticationFailed {
//!     status: 401,
//!     message: "invalid_client".to_string(),
//! };
//! assert_eq!(
//!     error.to_string(),
//!     "Could not authenticate with the provided credentials."
//! );
//! ```

use thiserror::Error;

use crate::clients::TransportError;

/// Errors that can occur while acquiring an OAuth access token.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OAuthError {
    /// The token endpoint rejected the configured credentials.
    ///
    /// The status and body are kept for diagnostics; the display message
    /// stays generic so credentials never leak into logs.
    #[error("Could not authenticate with the provided credentials.")]
    AuthenticationFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The response body returned by the token endpoint.
        message: String,
    },

    /// The token endpoint succeeded but its body was not a token document.
    #[error("Invalid token response: {message}")]
    InvalidTokenResponse {
        /// Description of what was wrong with the body.
        message: String,
    },

    /// The token request failed before a response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl OAuthError {
    /// Returns the HTTP status for endpoint rejections.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failed_message_is_generic() {
        let error = OAuthError::AuthenticationFailed {
            status: 400,
            message: r#"{"error":"invalid_client"}"#.to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Could not authenticate with the provided credentials."
        );
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn test_invalid_token_response_message() {
        let error = OAuthError::InvalidTokenResponse {
            message: "missing field `access_token`".to_string(),
        };
        assert!(error.to_string().contains("access_token"));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let error: OAuthError = TransportError::new("connection refused").into();
        assert_eq!(error.to_string(), "connection refused");
    }
}
