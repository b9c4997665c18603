//! Path translation client.

use crate::clients::router::RouterResponse;
use crate::clients::{ApiClient, ApiResponse, ClientError, RequestOptions};
use crate::config::{ClientConfig, DEFAULT_ROUTER_PREFIX, TYPE_DELIMITER};

/// Client for the decoupled router's path translation endpoint.
///
/// Translates a human-readable path such as `/articles/give-it-a-go` into the
/// entity it points at. Answers go through the same cache and credential
/// handling as the resource client.
///
/// # Thread Safety
///
/// `RouterClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use drupal_api_client::{ClientConfig, RouterClient};
/// use drupal_api_client::clients::router::RouterResponse;
///
/// let client = RouterClient::new(&ClientConfig::new("https://cms.example.com")?);
///
/// match client.translate_path("/articles/give-it-a-go", None).await?.into_json() {
///     RouterResponse::Resolved(resolved) => println!("uuid: {}", resolved.entity.uuid),
///     RouterResponse::Unresolved(unresolved) => println!("{}", unresolved.message),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RouterClient {
    api: ApiClient,
}

// Verify RouterClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RouterClient>();
};

impl RouterClient {
    /// Creates a router client. The prefix defaults to `router/translate-path`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config, DEFAULT_ROUTER_PREFIX),
        }
    }

    /// Creates a router client on top of an existing pipeline.
    #[must_use]
    pub const fn from_api_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Returns the translation URL for `path`.
    #[must_use]
    pub fn create_url(&self, path: &str, locale: Option<&str>) -> String {
        let locale = locale
            .filter(|locale| !locale.is_empty())
            .map_or(String::new(), |locale| format!("/{locale}"));
        format!(
            "{}{}/{}?path={}",
            self.api.base_url(),
            locale,
            self.api.api_prefix(),
            urlencoding::encode(path)
        )
    }

    /// Returns the cache key for a translation: `locale--path` or `path`.
    #[must_use]
    pub fn cache_key(path: &str, locale: Option<&str>) -> String {
        match locale.filter(|locale| !locale.is_empty()) {
            Some(locale) => format!("{locale}{TYPE_DELIMITER}{path}"),
            None => path.to_string(),
        }
    }

    /// Translates `path` into the entity it points at.
    ///
    /// An unknown path is not an error: it comes back as
    /// [`RouterResponse::Unresolved`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if the request fails
    /// - [`ClientError::Authentication`] if token acquisition fails
    /// - [`ClientError::Json`] if the answer is not a router document
    pub async fn translate_path(
        &self,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse<RouterResponse>, ClientError> {
        let options = options.unwrap_or_default();
        let locale = self.api.resolve_locale(&options);
        let url = self.create_url(path, locale);
        let cache_key = options
            .cache_key
            .clone()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| Self::cache_key(path, locale));

        let response = self
            .api
            .get_json(url, &cache_key, &options, "translate path", false)
            .await?;

        Ok(response.try_map(serde_json::from_value)?)
    }
}

impl AsRef<ApiClient> for RouterClient {
    fn as_ref(&self) -> &ApiClient {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;

    fn client(locale: Option<&str>) -> RouterClient {
        let mut builder =
            ClientConfig::builder().base_url(BaseUrl::new("https://cms.example.com").unwrap());
        if let Some(locale) = locale {
            builder = builder.default_locale(locale);
        }
        RouterClient::new(&builder.build().unwrap())
    }

    #[test]
    fn test_create_url_encodes_path() {
        assert_eq!(
            client(None).create_url("/recipes/fiery chili", None),
            "https://cms.example.com/router/translate-path?path=%2Frecipes%2Ffiery%20chili"
        );
    }

    #[test]
    fn test_create_url_with_locale() {
        assert_eq!(
            client(None).create_url("/about", Some("es")),
            "https://cms.example.com/es/router/translate-path?path=%2Fabout"
        );
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(RouterClient::cache_key("/about", None), "/about");
        assert_eq!(RouterClient::cache_key("/about", Some("es")), "es--/about");
    }

    #[test]
    fn test_prefix_override_from_pipeline() {
        let base = client(Some("en"));
        let router = RouterClient::from_api_client(base.api.with_api_prefix("router/path"));
        assert_eq!(
            router.create_url("/x", None),
            "https://cms.example.com/router/path?path=%2Fx"
        );
        assert_eq!(router.as_ref().default_locale(), Some("en"));
    }
}
