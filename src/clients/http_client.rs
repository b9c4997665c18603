//! Transport abstraction and the request pipeline shared by every client.
//!
//! - [`Transport`]: The injectable network call
//! - [`ReqwestTransport`]: The default transport, backed by `reqwest`
//! - [`ApiClient`]: Credential resolution, caching, (de)serialization and
//!   logging around a transport. The concrete clients each own one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::CredentialManager;
use crate::cache::{CacheGateway, StoreGate};
use crate::clients::errors::{ClientError, TransportError};
use crate::clients::http_request::{Credentials, HttpMethod, HttpRequest};
use crate::clients::http_response::{ApiResponse, HttpResponse};
use crate::clients::request_options::RequestOptions;
use crate::config::{BaseUrl, ClientConfig};
use crate::logging::{DebugLog, LogLevel, Logger, TracingLogger};
use crate::serializer::Serializer;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcome of a single network call made through the pipeline.
///
/// Exactly one side is populated. Transport failures are already
/// normalized into a [`ClientError`]; HTTP error statuses are not failures.
pub type FetchResult = Result<HttpResponse, ClientError>;

/// Sends a request and returns the complete response.
///
/// Implementations report network-level failures as [`TransportError`] and
/// return every HTTP response, whatever its status, as `Ok`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use async_trait::async_trait;
/// use drupal_api_client::clients::{HttpRequest, HttpResponse, Transport, TransportError};
///
/// /// Answers every request with an empty JSON:API document.
/// struct Canned;
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(200, "OK", HashMap::new(), r#"{"data":[]}"#))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
///
/// No cookie store is configured, so requests only carry cookies passed as
/// explicit headers. Those are dropped for [`Credentials::Omit`] requests.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around an existing client, e.g. one with timeouts.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                result
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        let omit = request.credentials == Credentials::Omit;
        for (key, value) in &request.headers {
            if omit && key.eq_ignore_ascii_case("cookie") {
                continue;
            }
            builder = builder.header(key, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;
        let status = res.status();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body,
        ))
    }
}

/// The request pipeline shared by the concrete clients.
///
/// Cloning is cheap; clones share the transport, the cache and the OAuth
/// token cell.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone)]
pub struct ApiClient {
    base_url: BaseUrl,
    api_prefix: String,
    transport: Arc<dyn Transport>,
    credentials: Arc<CredentialManager>,
    default_locale: Option<String>,
    cache: CacheGateway,
    serializer: Option<Arc<dyn Serializer>>,
    log: DebugLog,
    default_headers: HashMap<String, String>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Builds the pipeline from a configuration.
    ///
    /// `default_prefix` is used when the configuration carries no API prefix.
    #[must_use]
    pub fn new(config: &ClientConfig, default_prefix: &str) -> Self {
        let logger: Arc<dyn Logger> = match config.logger() {
            Some(logger) => Arc::clone(logger),
            None => Arc::new(TracingLogger),
        };
        let log = DebugLog::new(logger, config.debug());

        let transport: Arc<dyn Transport> = match config.transport() {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(ReqwestTransport::new()),
        };

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}drupal-api-client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            base_url: config.base_url().clone(),
            api_prefix: config.api_prefix().unwrap_or(default_prefix).to_string(),
            transport,
            credentials: Arc::new(CredentialManager::new(config.authentication().clone())),
            default_locale: config.default_locale().map(String::from),
            cache: CacheGateway::new(config.cache().cloned(), log.clone()),
            serializer: config.serializer().cloned(),
            log,
            default_headers,
        }
    }

    /// Returns a pipeline with a different API prefix.
    ///
    /// The copy shares the transport, the cache and the OAuth token.
    #[must_use]
    pub fn with_api_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            api_prefix: prefix.into(),
            ..self.clone()
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API prefix.
    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// Returns the default locale, if configured.
    #[must_use]
    pub fn default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the credential manager.
    #[must_use]
    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Returns the cache gateway.
    #[must_use]
    pub const fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    /// Returns the debug log.
    #[must_use]
    pub const fn log(&self) -> &DebugLog {
        &self.log
    }

    /// Returns the locale for a call: the explicit one, else the default.
    #[must_use]
    pub fn resolve_locale<'a>(&'a self, options: &'a RequestOptions) -> Option<&'a str> {
        options
            .locale
            .as_deref()
            .filter(|locale| !locale.is_empty())
            .or(self.default_locale.as_deref())
    }

    /// Returns what the cache holds under `key`, if anything.
    pub async fn get_cached_response(&self, key: &str) -> Option<Value> {
        self.cache.get(key).await
    }

    /// Sends a request through the pipeline.
    ///
    /// Default headers are added, and the `Authorization` header is resolved
    /// unless the request omits credentials. Failures are logged at error
    /// level when debug is enabled and returned, never panicked on.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRequest`] if the request fails validation
    /// - [`ClientError::Config`] or [`ClientError::Authentication`] if
    ///   credentials cannot be resolved
    /// - [`ClientError::Transport`] if the transport fails
    pub async fn fetch(&self, request: HttpRequest) -> FetchResult {
        let result = self.execute(request).await;
        if let Err(error) = &result {
            self.log.log(LogLevel::Error, &error.to_string());
        }
        result
    }

    /// Like [`fetch`](Self::fetch), but a failure is logged once as
    /// `"{failure} Error: {error}"`.
    pub(crate) async fn fetch_or_log(&self, request: HttpRequest, failure: &str) -> FetchResult {
        let result = self.execute(request).await;
        if let Err(error) = &result {
            self.log
                .log(LogLevel::Error, &format!("{failure} Error: {error}"));
        }
        result
    }

    async fn execute(&self, mut request: HttpRequest) -> FetchResult {
        request.verify()?;

        for (key, value) in &self.default_headers {
            if request.header(key).is_none() {
                request.headers.insert(key.clone(), value.clone());
            }
        }

        match request.credentials {
            Credentials::Include => {
                let authorization = self
                    .credentials
                    .authorization_header(self.transport.as_ref(), &self.base_url, &self.log)
                    .await?;
                if let Some(value) = authorization {
                    request.headers.insert("Authorization".to_string(), value);
                }
            }
            Credentials::Omit => {
                request
                    .headers
                    .retain(|key, _| !key.eq_ignore_ascii_case("authorization"));
            }
        }

        tracing::debug!(method = %request.http_method, url = %request.url, "Sending request");
        Ok(self.transport.send(request).await?)
    }

    /// Applies the serializer's `deserialize`, if one is configured.
    pub(crate) fn deserialize(&self, body: Value) -> Result<Value, ClientError> {
        match &self.serializer {
            Some(serializer) => serializer.deserialize(body).map_err(ClientError::Serializer),
            None => Ok(body),
        }
    }

    /// Applies the serializer's `serialize`, if one is configured.
    pub(crate) fn serialize(&self, body: Value) -> Result<Value, ClientError> {
        match &self.serializer {
            Some(serializer) => serializer.serialize(body).map_err(ClientError::Serializer),
            None => Ok(body),
        }
    }

    /// Runs a cached GET: cache lookup, fetch, parse, deserialize, store.
    ///
    /// `action` completes the sentence "Failed to ..." in the error log.
    /// Documents that are not resources (router answers, the index) pass
    /// `apply_serializer = false`.
    pub(crate) async fn get_json(
        &self,
        url: String,
        cache_key: &str,
        options: &RequestOptions,
        action: &str,
        apply_serializer: bool,
    ) -> Result<ApiResponse, ClientError> {
        if let Some(cached) = self.cached_json(cache_key, options).await {
            return Ok(cached);
        }
        self.fetch_json(url, cache_key, options, action, apply_serializer)
            .await
    }

    /// Returns the cached document for `cache_key`, unless the options skip
    /// the cache.
    pub(crate) async fn cached_json(
        &self,
        cache_key: &str,
        options: &RequestOptions,
    ) -> Option<ApiResponse> {
        if !options.reads_cache() {
            return None;
        }
        self.cache.get(cache_key).await.map(ApiResponse::Parsed)
    }

    /// The network half of [`get_json`](Self::get_json): no cache read.
    pub(crate) async fn fetch_json(
        &self,
        url: String,
        cache_key: &str,
        options: &RequestOptions,
        action: &str,
        apply_serializer: bool,
    ) -> Result<ApiResponse, ClientError> {
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .credentials(options.credentials())
            .build()?;

        let response = self
            .fetch_or_log(request, &format!("Failed to {action}."))
            .await?;

        let json = response.json()?;
        let json = if apply_serializer {
            self.deserialize(json)?
        } else {
            json
        };

        self.cache
            .maybe_store(
                cache_key,
                &json,
                StoreGate {
                    status: response.status,
                    disable_cache: options.disable_cache,
                },
            )
            .await;

        Ok(if options.raw_response {
            ApiResponse::Raw { response, json }
        } else {
            ApiResponse::Parsed(json)
        })
    }
}

impl AsRef<Self> for ApiClient {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_prefix", &self.api_prefix)
            .field("credentials", &self.credentials)
            .field("default_locale", &self.default_locale)
            .field("cache", &self.cache)
            .field("serializer", &self.serializer.is_some())
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}
