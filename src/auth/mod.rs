//! Authentication for outgoing requests.
//!
//! # Overview
//!
//! - [`Authentication`]: The strategy a client is configured with
//! - [`CredentialManager`]: Turns the strategy into an `Authorization` header,
//!   acquiring and caching OAuth tokens as needed
//! - [`oauth`]: Token acquisition against the site's `/oauth/token` endpoint
//!
//! # Strategies
//!
//! | Strategy | Header value |
//! |----------|--------------|
//! | `None` | no header |
//! | `Basic` | `Basic base64(username:password)` |
//! | `OAuth` | `{token_type} {access_token}` |
//! | `Custom` | the configured value, as-is |
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::auth::{basic_authorization, Authentication};
//!
//! let auth = Authentication::basic("testUser", "testPassword");
//! assert!(auth.validate().is_ok());
//!
//! assert_eq!(
//!     basic_authorization("testUser", "testPassword"),
//!     "Basic dGVzdFVzZXI6dGVzdFBhc3N3b3Jk"
//! );
//! ```

pub mod oauth;

use std::fmt;

use base64::prelude::*;
use tokio::sync::Mutex;

use crate::clients::{ClientError, Transport};
use crate::config::BaseUrl;
use crate::error::ConfigError;
use crate::logging::{DebugLog, LogLevel};

use self::oauth::{OAuthCredentials, OAuthToken};

/// How a client authenticates its requests.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Authentication {
    /// Requests are sent without an `Authorization` header.
    #[default]
    None,
    /// HTTP Basic authentication.
    Basic {
        /// The account name.
        username: String,
        /// The account password.
        password: String,
    },
    /// OAuth bearer tokens acquired from `/oauth/token`.
    OAuth(OAuthCredentials),
    /// A literal `Authorization` header value, e.g. `Bearer <token>`.
    Custom {
        /// The header value.
        value: String,
    },
}

impl Authentication {
    /// Creates a Basic strategy.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates an OAuth strategy.
    #[must_use]
    pub const fn oauth(credentials: OAuthCredentials) -> Self {
        Self::OAuth(credentials)
    }

    /// Creates a Custom strategy.
    #[must_use]
    pub fn custom(value: impl Into<String>) -> Self {
        Self::Custom {
            value: value.into(),
        }
    }

    /// Returns a short name for the strategy, suitable for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Basic { .. } => "Basic",
            Self::OAuth(_) => "OAuth",
            Self::Custom { .. } => "Custom",
        }
    }

    /// Checks the strategy is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when OAuth credentials are incomplete.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::OAuth(credentials) => credentials.validate(),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"*****")
                .finish(),
            Self::OAuth(credentials) => f.debug_tuple("OAuth").field(credentials).finish(),
            Self::Custom { .. } => f.debug_struct("Custom").field("value", &"*****").finish(),
        }
    }
}

/// Builds a Basic `Authorization` header value.
#[must_use]
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{username}:{password}"))
    )
}

/// Resolves the `Authorization` header for each request.
///
/// The manager owns the only mutable state of a client: the cached OAuth
/// token. The token cell is locked for the whole acquisition, so concurrent
/// requests on one client wait for a single token request instead of each
/// sending their own.
pub struct CredentialManager {
    strategy: Authentication,
    token: Mutex<Option<OAuthToken>>,
}

impl CredentialManager {
    /// Creates a manager for the given strategy.
    #[must_use]
    pub fn new(strategy: Authentication) -> Self {
        Self {
            strategy,
            token: Mutex::new(None),
        }
    }

    /// Returns the configured strategy.
    #[must_use]
    pub const fn strategy(&self) -> &Authentication {
        &self.strategy
    }

    /// Returns a copy of the cached OAuth token, if one has been acquired.
    pub async fn cached_token(&self) -> Option<OAuthToken> {
        self.token.lock().await.clone()
    }

    /// Returns the `Authorization` header value for the next request.
    ///
    /// For OAuth, a cached token is reused while valid; otherwise a new one
    /// is requested through `transport` from `{base_url}/oauth/token`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if OAuth credentials are incomplete
    /// - [`ClientError::Authentication`] if token acquisition fails
    pub async fn authorization_header(
        &self,
        transport: &dyn Transport,
        base_url: &BaseUrl,
        log: &DebugLog,
    ) -> Result<Option<String>, ClientError> {
        match &self.strategy {
            Authentication::None => {
                log.log(
                    LogLevel::Debug,
                    "No authentication strategy configured; no authorization applied.",
                );
                Ok(None)
            }
            Authentication::Basic { username, password } => {
                Ok(Some(basic_authorization(username, password)))
            }
            Authentication::Custom { value } => Ok(Some(value.clone())),
            Authentication::OAuth(credentials) => {
                credentials.validate()?;

                let mut cached = self.token.lock().await;
                if let Some(token) = cached.as_ref().filter(|token| token.is_valid()) {
                    return Ok(Some(token.authorization_value()));
                }

                log.log(LogLevel::Debug, "Acquiring a new OAuth token.");
                let token = oauth::request_token(transport, base_url, credentials).await?;
                let value = token.authorization_value();
                *cached = Some(token);
                Ok(Some(value))
            }
        }
    }
}

impl fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialManager")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

// Verify CredentialManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Authentication>();
    assert_send_sync::<CredentialManager>();
};
