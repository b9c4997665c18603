//! Per-call options shared by every read and write operation.

use crate::clients::http_request::Credentials;

/// Options accepted by every client operation.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::clients::RequestOptions;
///
/// let options = RequestOptions::new()
///     .locale("es")
///     .query_string("include=uid")
///     .raw_response(true);
///
/// assert_eq!(options.locale.as_deref(), Some("es"));
/// assert!(options.raw_response);
/// assert!(!options.disable_cache);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Locale segment; overrides the client's default locale.
    pub locale: Option<String>,
    /// URL-encoded query string, without the leading `?`.
    pub query_string: Option<String>,
    /// Return the untouched response alongside the parsed body.
    pub raw_response: bool,
    /// Neither read from nor write to the cache.
    pub disable_cache: bool,
    /// Send the request without authorization or cookies.
    pub disable_authentication: bool,
    /// Cache key to use instead of the derived one.
    pub cache_key: Option<String>,
}

impl RequestOptions {
    /// Creates options with every flag off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the query string.
    #[must_use]
    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    /// Requests raw-response mode.
    #[must_use]
    pub const fn raw_response(mut self, raw: bool) -> Self {
        self.raw_response = raw;
        self
    }

    /// Disables the cache for this call.
    #[must_use]
    pub const fn disable_cache(mut self, disable: bool) -> Self {
        self.disable_cache = disable;
        self
    }

    /// Disables authentication for this call.
    #[must_use]
    pub const fn disable_authentication(mut self, disable: bool) -> Self {
        self.disable_authentication = disable;
        self
    }

    /// Sets an explicit cache key.
    #[must_use]
    pub fn cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Returns the credentials mode implied by `disable_authentication`.
    #[must_use]
    pub const fn credentials(&self) -> Credentials {
        if self.disable_authentication {
            Credentials::Omit
        } else {
            Credentials::Include
        }
    }

    /// Returns `true` if a cache lookup should happen before fetching.
    #[must_use]
    pub const fn reads_cache(&self) -> bool {
        !self.raw_response && !self.disable_cache
    }

    /// Returns the query string if it is non-empty.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query_string.as_deref().filter(|qs| !qs.is_empty())
    }
}
