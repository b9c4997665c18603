//! Client configuration.
//!
//! # Overview
//!
//! - [`ClientConfig`]: Everything a client needs to build its request pipeline
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: A validated site URL
//! - [`ResourceType`]: A validated `entityType--bundle` identifier
//! - [`ViewId`]: A validated `viewName--displayId` identifier
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::{Authentication, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
//!     .authentication(Authentication::basic("admin", "secret"))
//!     .default_locale("en")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.default_locale(), Some("en"));
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, ResourceType, ViewId, TYPE_DELIMITER};

use std::fmt;
use std::sync::Arc;

use crate::auth::Authentication;
use crate::cache::Cache;
use crate::clients::Transport;
use crate::error::ConfigError;
use crate::logging::Logger;
use crate::serializer::Serializer;

/// Default API prefix of the JSON:API client.
pub const DEFAULT_JSON_API_PREFIX: &str = "jsonapi";

/// Default API prefix of the router client.
pub const DEFAULT_ROUTER_PREFIX: &str = "router/translate-path";

/// Default API prefix of the GraphQL client.
pub const DEFAULT_GRAPHQL_PREFIX: &str = "graphql";

/// Configuration for a client.
///
/// Immutable once built. Cloning shares the injected transport, cache,
/// serializer and logger.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: BaseUrl,
    api_prefix: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    authentication: Authentication,
    default_locale: Option<String>,
    cache: Option<Arc<dyn Cache>>,
    serializer: Option<Arc<dyn Serializer>>,
    logger: Option<Arc<dyn Logger>>,
    debug: bool,
    user_agent_prefix: Option<String>,
    index_lookup: bool,
    router_api_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Shorthand for a configuration with only a base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the URL is empty or invalid.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::builder().base_url(BaseUrl::new(base_url)?).build()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API prefix override, if configured.
    #[must_use]
    pub fn api_prefix(&self) -> Option<&str> {
        self.api_prefix.as_deref()
    }

    /// Returns the injected transport, if configured.
    #[must_use]
    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.as_ref()
    }

    /// Returns the authentication strategy.
    #[must_use]
    pub const fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    /// Returns the default locale, if configured.
    #[must_use]
    pub fn default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    /// Returns the cache, if configured.
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<dyn Cache>> {
        self.cache.as_ref()
    }

    /// Returns the serializer, if configured.
    #[must_use]
    pub fn serializer(&self) -> Option<&Arc<dyn Serializer>> {
        self.serializer.as_ref()
    }

    /// Returns the logger, if configured.
    #[must_use]
    pub fn logger(&self) -> Option<&Arc<dyn Logger>> {
        self.logger.as_ref()
    }

    /// Returns whether debug logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether collection URLs are looked up in the index document.
    #[must_use]
    pub const fn index_lookup(&self) -> bool {
        self.index_lookup
    }

    /// Returns the router prefix override, if configured.
    #[must_use]
    pub fn router_api_prefix(&self) -> Option<&str> {
        self.router_api_prefix.as_deref()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_prefix", &self.api_prefix)
            .field("transport", &self.transport.is_some())
            .field("authentication", &self.authentication)
            .field("default_locale", &self.default_locale)
            .field("cache", &self.cache.is_some())
            .field("serializer", &self.serializer.is_some())
            .field("logger", &self.logger.is_some())
            .field("debug", &self.debug)
            .field("user_agent_prefix", &self.user_agent_prefix)
            .field("index_lookup", &self.index_lookup)
            .field("router_api_prefix", &self.router_api_prefix)
            .finish()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_url` is the only required field.
///
/// # Defaults
///
/// - `api_prefix`: the client's own default (`jsonapi`, `router/translate-path` or `graphql`)
/// - `transport`: a reqwest-backed transport
/// - `authentication`: [`Authentication::None`]
/// - `cache`, `serializer`, `default_locale`: `None`
/// - `logger`: a `tracing`-backed logger
/// - `debug`, `index_lookup`: `false`
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use drupal_api_client::{BaseUrl, ClientConfig};
/// use drupal_api_client::cache::MemoryCache;
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
///     .api_prefix("api")
///     .cache(Arc::new(MemoryCache::new()))
///     .debug(true)
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_prefix(), Some("api"));
/// assert!(config.debug());
/// ```
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    api_prefix: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    authentication: Option<Authentication>,
    default_locale: Option<String>,
    cache: Option<Arc<dyn Cache>>,
    serializer: Option<Arc<dyn Serializer>>,
    logger: Option<Arc<dyn Logger>>,
    debug: Option<bool>,
    user_agent_prefix: Option<String>,
    index_lookup: Option<bool>,
    router_api_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Overrides the API path prefix.
    #[must_use]
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    /// Injects the transport used for every request.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the authentication strategy.
    #[must_use]
    pub fn authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Sets the locale used when a call does not pass one.
    #[must_use]
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Sets the response cache.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the response serializer.
    #[must_use]
    pub fn serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Sets the logger used when debug is enabled.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enables or disables debug logging.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables resolving collection URLs through the index document.
    #[must_use]
    pub const fn index_lookup(mut self, enabled: bool) -> Self {
        self.index_lookup = Some(enabled);
        self
    }

    /// Overrides the router prefix used by path lookups.
    #[must_use]
    pub fn router_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.router_api_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// and [`ConfigError::MissingOAuthCredentials`] or
    /// [`ConfigError::MissingPasswordGrantCredentials`] if the OAuth strategy
    /// is incomplete.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let authentication = self.authentication.unwrap_or_default();
        authentication.validate()?;

        Ok(ClientConfig {
            base_url,
            api_prefix: self.api_prefix.filter(|prefix| !prefix.is_empty()),
            transport: self.transport,
            authentication,
            default_locale: self.default_locale.filter(|locale| !locale.is_empty()),
            cache: self.cache,
            serializer: self.serializer,
            logger: self.logger,
            debug: self.debug.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
            index_lookup: self.index_lookup.unwrap_or(false),
            router_api_prefix: self.router_api_prefix.filter(|prefix| !prefix.is_empty()),
        })
    }
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("authentication", &self.authentication)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::OAuthCredentials;
    use crate::cache::MemoryCache;

    fn base_url() -> BaseUrl {
        BaseUrl::new("https://cms.example.com").unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        assert!(matches!(
            ClientConfig::new(""),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().base_url(base_url()).build().unwrap();

        assert_eq!(config.base_url().as_ref(), "https://cms.example.com");
        assert!(config.api_prefix().is_none());
        assert!(config.transport().is_none());
        assert_eq!(config.authentication(), &Authentication::None);
        assert!(config.default_locale().is_none());
        assert!(config.cache().is_none());
        assert!(config.serializer().is_none());
        assert!(config.logger().is_none());
        assert!(!config.debug());
        assert!(!config.index_lookup());
        assert!(config.router_api_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_incomplete_oauth() {
        let result = ClientConfig::builder()
            .base_url(base_url())
            .authentication(Authentication::oauth(OAuthCredentials::new("id", "")))
            .build();

        assert!(matches!(result, Err(ConfigError::MissingOAuthCredentials)));
    }

    #[test]
    fn test_empty_strings_are_treated_as_unset() {
        let config = ClientConfig::builder()
            .base_url(base_url())
            .api_prefix("")
            .default_locale("")
            .build()
            .unwrap();

        assert!(config.api_prefix().is_none());
        assert!(config.default_locale().is_none());
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = ClientConfig::builder()
            .base_url(base_url())
            .cache(Arc::new(MemoryCache::new()))
            .authentication(Authentication::basic("admin", "top-secret"))
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.base_url(), config.base_url());
        assert!(cloned.cache().is_some());

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("top-secret"));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .base_url(base_url())
            .api_prefix("api")
            .default_locale("es")
            .debug(true)
            .user_agent_prefix("MyApp/1.0")
            .index_lookup(true)
            .router_api_prefix("router/path")
            .build()
            .unwrap();

        assert_eq!(config.api_prefix(), Some("api"));
        assert_eq!(config.default_locale(), Some("es"));
        assert!(config.debug());
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert!(config.index_lookup());
        assert_eq!(config.router_api_prefix(), Some("router/path"));
    }
}
