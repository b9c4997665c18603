//! OAuth 2.0 token acquisition.
//!
//! Clients configured with [`Authentication::OAuth`](crate::auth::Authentication::OAuth)
//! obtain bearer tokens from the site's `/oauth/token` endpoint. Two grants
//! are supported:
//!
//! - **Client Credentials** (the default): `client_id` and `client_secret` only
//! - **Password**: additionally sends `username` and `password`
//!
//! The token request goes straight to the configured [`Transport`]; it never
//! passes back through the credential manager.
//!
//! # Token Validity
//!
//! A token is reused until 10 seconds before its nominal expiry. After that
//! the next request acquires a new one.
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::auth::oauth::OAuthCredentials;
//!
//! let credentials = OAuthCredentials::new("client-id", "client-secret")
//!     .grant_type("password")
//!     .username("editor")
//!     .password("hunter2");
//!
//! assert!(credentials.validate().is_ok());
//! assert!(!format!("{credentials:?}").contains("hunter2"));
//! ```

mod error;

pub use error::OAuthError;

use std::fmt;

use serde::Deserialize;

use crate::clients::{ClientError, DataType, HttpMethod, HttpRequest, Transport};
use crate::config::BaseUrl;
use crate::error::ConfigError;

/// Path of the token endpoint relative to the base URL.
pub const TOKEN_PATH: &str = "oauth/token";

/// Grant type used when none is configured.
pub const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Grant type that also sends a username and password.
pub const PASSWORD_GRANT_TYPE: &str = "password";

/// Tokens are treated as expired this many milliseconds early.
pub const TOKEN_EXPIRY_MARGIN_MS: i64 = 10_000;

/// Credentials for the OAuth strategy.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    client_id: String,
    client_secret: String,
    grant_type: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl OAuthCredentials {
    /// Creates client-credentials grant credentials.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            grant_type: None,
            username: None,
            password: None,
        }
    }

    /// Sets an explicit grant type.
    #[must_use]
    pub fn grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = Some(grant_type.into());
        self
    }

    /// Sets the username sent with the password grant.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password sent with the password grant.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Returns the client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the effective grant type.
    #[must_use]
    pub fn effective_grant_type(&self) -> &str {
        self.grant_type
            .as_deref()
            .filter(|grant| !grant.is_empty())
            .unwrap_or(CLIENT_CREDENTIALS_GRANT_TYPE)
    }

    /// Checks that every field the grant needs is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOAuthCredentials`] when the client id or
    /// secret is empty, and [`ConfigError::MissingPasswordGrantCredentials`]
    /// when the password grant lacks a username or password.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ConfigError::MissingOAuthCredentials);
        }
        if self.effective_grant_type() == PASSWORD_GRANT_TYPE
            && (is_blank(self.username.as_deref()) || is_blank(self.password.as_deref()))
        {
            return Err(ConfigError::MissingPasswordGrantCredentials);
        }
        Ok(())
    }

    /// Encodes the token request body.
    #[must_use]
    pub fn form_body(&self) -> String {
        let mut pairs = vec![
            ("grant_type", self.effective_grant_type()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        if let Some(username) = self.username.as_deref() {
            pairs.push(("username", username));
        }
        if let Some(password) = self.password.as_deref() {
            pairs.push(("password", password));
        }

        pairs
            .into_iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"*****")
            .field("grant_type", &self.effective_grant_type())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "*****"))
            .finish()
    }
}

/// Token document returned by the token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Lifetime of the token in seconds.
    pub expires_in: i64,
    /// Scheme to use in the `Authorization` header (usually `Bearer`).
    pub token_type: String,
}

/// A token held by a client between requests.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
    access_token: String,
    token_type: String,
    valid_until: i64,
}

impl OAuthToken {
    /// Creates a token that expires at `valid_until` (epoch milliseconds).
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        valid_until: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            valid_until,
        }
    }

    /// Builds a token from an endpoint response received at `issued_at` (epoch milliseconds).
    #[must_use]
    pub fn from_response(response: AccessTokenResponse, issued_at: i64) -> Self {
        Self {
            valid_until: issued_at.saturating_add(response.expires_in.saturating_mul(1000)),
            access_token: response.access_token,
            token_type: response.token_type,
        }
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the token type.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the nominal expiry in epoch milliseconds.
    #[must_use]
    pub const fn valid_until(&self) -> i64 {
        self.valid_until
    }

    /// Returns `true` if the token can still be used at `now` (epoch milliseconds).
    #[must_use]
    pub const fn is_valid_at(&self, now: i64) -> bool {
        self.valid_until - TOKEN_EXPIRY_MARGIN_MS >= now
    }

    /// Returns `true` if the token can still be used.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(now_millis())
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthToken")
            .field("access_token", &"*****")
            .field("token_type", &self.token_type)
            .field("valid_until", &self.valid_until)
            .finish()
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Requests a new token from `{base_url}/oauth/token`.
///
/// # Errors
///
/// - [`ClientError::Config`] if the credentials are incomplete (no request is sent)
/// - [`ClientError::Authentication`] if the endpoint returns a non-2xx status,
///   the body is not a token document, or the transport fails
pub async fn request_token(
    transport: &dyn Transport,
    base_url: &BaseUrl,
    credentials: &OAuthCredentials,
) -> Result<OAuthToken, ClientError> {
    credentials.validate()?;

    let url = format!("{base_url}/{TOKEN_PATH}");
    let request = HttpRequest::builder(HttpMethod::Post, url)
        .body(credentials.form_body())
        .body_type(DataType::FormUrlEncoded)
        .header("Accept", "application/json")
        .build()?;

    tracing::debug!(
        grant_type = credentials.effective_grant_type(),
        "Requesting OAuth token"
    );
    let response = transport
        .send(request)
        .await
        .map_err(OAuthError::Transport)?;

    if !response.is_ok() {
        tracing::warn!(status = response.status, "OAuth token request was rejected");
        return Err(OAuthError::AuthenticationFailed {
            status: response.status,
            message: response.body,
        }
        .into());
    }

    let token_response: AccessTokenResponse =
        serde_json::from_str(response.text()).map_err(|e| OAuthError::InvalidTokenResponse {
            message: e.to_string(),
        })?;

    Ok(OAuthToken::from_response(token_response, now_millis()))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthCredentials>();
    assert_send_sync::<OAuthToken>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ReqwestTransport;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_validate_rejects_missing_client_secret() {
        let credentials = OAuthCredentials::new("client-id", "");
        assert_eq!(
            credentials.validate(),
            Err(ConfigError::MissingOAuthCredentials)
        );
    }

    #[test]
    fn test_validate_rejects_incomplete_password_grant() {
        let credentials = OAuthCredentials::new("id", "secret")
            .grant_type(PASSWORD_GRANT_TYPE)
            .username("editor");
        assert_eq!(
            credentials.validate(),
            Err(ConfigError::MissingPasswordGrantCredentials)
        );
    }

    #[test]
    fn test_form_body_defaults_to_client_credentials() {
        let credentials = OAuthCredentials::new("my id", "s&cret");
        assert_eq!(
            credentials.form_body(),
            "grant_type=client_credentials&client_id=my%20id&client_secret=s%26cret"
        );
    }

    #[test]
    fn test_form_body_includes_password_grant_fields() {
        let credentials = OAuthCredentials::new("id", "secret")
            .grant_type("password")
            .username("editor")
            .password("pw");
        assert_eq!(
            credentials.form_body(),
            "grant_type=password&client_id=id&client_secret=secret&username=editor&password=pw"
        );
    }

    #[test]
    fn test_token_validity_uses_ten_second_margin() {
        let token = OAuthToken::new("abc", "Bearer", 100_000);
        assert!(token.is_valid_at(90_000));
        assert!(!token.is_valid_at(90_001));
    }

    #[test]
    fn test_from_response_converts_seconds_to_millis() {
        let response = AccessTokenResponse {
            access_token: "abc".to_string(),
            expires_in: 300,
            token_type: "Bearer".to_string(),
        };
        let token = OAuthToken::from_response(response, 1_000);
        assert_eq!(token.valid_until(), 301_000);
        assert_eq!(token.authorization_value(), "Bearer abc");
    }

    #[test]
    fn test_debug_masks_secrets() {
        let token = OAuthToken::new("very-secret-token", "Bearer", 0);
        assert!(!format!("{token:?}").contains("very-secret-token"));

        let credentials = OAuthCredentials::new("id", "very-secret-value");
        assert!(!format!("{credentials:?}").contains("very-secret-value"));
    }

    #[tokio::test]
    async fn test_request_token_posts_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string(
                "grant_type=client_credentials&client_id=id&client_secret=secret",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "token-1",
                "expires_in": 300,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let base_url = BaseUrl::new(server.uri()).unwrap();
        let token = request_token(
            &ReqwestTransport::new(),
            &base_url,
            &OAuthCredentials::new("id", "secret"),
        )
        .await
        .unwrap();

        assert_eq!(token.access_token(), "token-1");
        assert!(token.is_valid());
    }

    #[tokio::test]
    async fn test_request_token_rejected_returns_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let base_url = BaseUrl::new(server.uri()).unwrap();
        let result = request_token(
            &ReqwestTransport::new(),
            &base_url,
            &OAuthCredentials::new("id", "wrong"),
        )
        .await;

        match result {
            Err(ClientError::Authentication(OAuthError::AuthenticationFailed { status, message })) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid_client");
            }
            other => panic!("expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_token_with_missing_credentials_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let base_url = BaseUrl::new(server.uri()).unwrap();
        let result = request_token(
            &ReqwestTransport::new(),
            &base_url,
            &OAuthCredentials::new("", "secret"),
        )
        .await;

        assert!(matches!(
            result,
            Err(ClientError::Config(ConfigError::MissingOAuthCredentials))
        ));
    }
}
