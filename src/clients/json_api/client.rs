//! JSON:API client implementation.

use serde_json::Value;

use crate::cache::{derive_cache_key, CacheKeyDescriptor};
use crate::clients::json_api::{DeleteResponse, JsonApiIndex, RequestBody};
use crate::clients::router::{RouterClient, RouterResponse};
use crate::clients::{
    ApiClient, ApiResponse, ClientError, DataType, HttpMethod, HttpRequest, HttpResponse,
    RequestOptions,
};
use crate::config::{
    ClientConfig, ResourceType, ViewId, DEFAULT_JSON_API_PREFIX, DEFAULT_ROUTER_PREFIX,
};
use crate::logging::LogLevel;

/// Prefix of the index document's cache key.
pub const INDEX_KEY_PREFIX: &str = "index:";

/// Media type of JSON:API documents.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Client for a Drupal JSON:API endpoint.
///
/// Reads go through the cache (when one is configured); writes never do.
/// Every operation accepts the same [`RequestOptions`].
///
/// # Thread Safety
///
/// `JsonApiClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use drupal_api_client::{ClientConfig, JsonApiClient};
/// use drupal_api_client::clients::RequestOptions;
///
/// let client = JsonApiClient::new(&ClientConfig::new("https://cms.example.com")?);
///
/// let recipes = client.get_collection("node--recipe", None).await?;
/// println!("{}", recipes.json()["data"]);
///
/// let options = RequestOptions::new().locale("es").query_string("include=uid");
/// let recipe = client
///     .get_resource("node--recipe", "35f7cd32-2c54-49f2-8740-0b0ec2ba61f6", Some(options))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct JsonApiClient {
    api: ApiClient,
    index_lookup: bool,
    router_prefix: String,
}

// Verify JsonApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JsonApiClient>();
};

impl JsonApiClient {
    /// Creates a JSON:API client. The prefix defaults to `jsonapi`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config, DEFAULT_JSON_API_PREFIX),
            index_lookup: config.index_lookup(),
            router_prefix: config
                .router_api_prefix()
                .unwrap_or(DEFAULT_ROUTER_PREFIX)
                .to_string(),
        }
    }

    /// Returns a router client that shares this client's pipeline.
    #[must_use]
    pub fn router(&self) -> RouterClient {
        RouterClient::from_api_client(self.api.with_api_prefix(self.router_prefix.as_str()))
    }

    /// Builds an endpoint URL.
    ///
    /// ```text
    /// {base}[/{locale}]/{prefix}/{entityType}/{bundle}[/{id}][?{query}]
    /// {base}[/{locale}]/{prefix}/views/{view}/{display}[?{query}]
    /// ```
    ///
    /// The descriptor's `cache_key` is ignored.
    #[must_use]
    pub fn create_url(&self, descriptor: &CacheKeyDescriptor<'_>) -> String {
        let mut url = self.api.base_url().to_string();

        if let Some(locale) = present(descriptor.locale) {
            url.push('/');
            url.push_str(locale);
        }
        url.push('/');
        url.push_str(self.api.api_prefix());

        if let Some(view_name) = present(descriptor.view_name) {
            url.push_str("/views/");
            url.push_str(view_name);
            if let Some(display_id) = present(descriptor.view_display_id) {
                url.push('/');
                url.push_str(display_id);
            }
        } else {
            for segment in [descriptor.entity_type_id, descriptor.bundle_id] {
                if let Some(segment) = present(segment) {
                    url.push('/');
                    url.push_str(segment);
                }
            }
        }

        if let Some(resource_id) = present(descriptor.resource_id) {
            url.push('/');
            url.push_str(resource_id);
        }
        if let Some(query_string) = present(descriptor.query_string) {
            url.push('?');
            url.push_str(query_string);
        }
        url
    }

    /// Fetches the index document for `locale` (no locale segment for `None`).
    ///
    /// The document is cached under `index:{prefix}[:{locale}]`. Derived
    /// resource and view keys always contain `--`, so the two never meet.
    /// Only `disable_cache` and `disable_authentication` apply from `options`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails or the body is not JSON.
    pub async fn get_index(
        &self,
        locale: Option<&str>,
        options: Option<RequestOptions>,
    ) -> Result<JsonApiIndex, ClientError> {
        self.fetch_index(locale, &options.unwrap_or_default()).await
    }

    /// Returns the cache key of the index document.
    #[must_use]
    pub fn index_cache_key(&self, locale: Option<&str>) -> String {
        match locale.filter(|locale| !locale.is_empty()) {
            Some(locale) => format!("{INDEX_KEY_PREFIX}{}:{locale}", self.api.api_prefix()),
            None => format!("{INDEX_KEY_PREFIX}{}", self.api.api_prefix()),
        }
    }

    async fn fetch_index(
        &self,
        locale: Option<&str>,
        options: &RequestOptions,
    ) -> Result<JsonApiIndex, ClientError> {
        let locale = locale.filter(|locale| !locale.is_empty());
        let url = self.create_url(&CacheKeyDescriptor {
            locale,
            ..Default::default()
        });
        let index_options = RequestOptions::new()
            .disable_cache(options.disable_cache)
            .disable_authentication(options.disable_authentication);

        let response = self
            .api
            .get_json(
                url,
                &self.index_cache_key(locale),
                &index_options,
                "fetch index",
                false,
            )
            .await?;
        Ok(serde_json::from_value(response.into_json())?)
    }

    /// Fetches a collection of resources.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if `resource_type` is not `entityType--bundle`
    ///   (no request is made)
    /// - [`ClientError::Transport`] or [`ClientError::Authentication`] if the
    ///   request fails
    /// - [`ClientError::Json`] if the body is not JSON
    pub async fn get_collection(
        &self,
        resource_type: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();
        let resource_type = ResourceType::new(resource_type)?;
        self.get_entity(&resource_type, None, &options, "fetch collection")
            .await
    }

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Same as [`get_collection`](Self::get_collection).
    pub async fn get_resource(
        &self,
        resource_type: &str,
        resource_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();
        let resource_type = ResourceType::new(resource_type)?;
        self.get_entity(&resource_type, Some(resource_id), &options, "fetch resource")
            .await
    }

    /// Fetches the results of a view exposed through JSON:API Views.
    ///
    /// `view` is a `viewName--displayId` identifier.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if `view` is malformed (no request is made)
    /// - otherwise the same as [`get_collection`](Self::get_collection)
    pub async fn get_view(
        &self,
        view: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();
        let view = ViewId::new(view)?;
        let locale = self.api.resolve_locale(&options);

        let descriptor = CacheKeyDescriptor {
            view_name: Some(view.view_name()),
            view_display_id: Some(view.display_id()),
            locale,
            query_string: options.query(),
            cache_key: options.cache_key.as_deref(),
            ..Default::default()
        };
        let url = self.create_url(&descriptor);
        let cache_key = derive_cache_key(&descriptor);

        self.api
            .get_json(url, &cache_key, &options, "fetch view", true)
            .await
    }

    /// Creates a resource. A 201 response counts as success.
    ///
    /// Other statuses are logged and returned, not raised.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if `resource_type` is malformed
    /// - [`ClientError::Serializer`] if the serializer rejects the body
    /// - [`ClientError::Transport`] or [`ClientError::Authentication`] if the
    ///   request fails
    pub async fn create_resource(
        &self,
        resource_type: &str,
        body: impl Into<RequestBody>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();
        let resource_type = ResourceType::new(resource_type)?;
        let locale = self.api.resolve_locale(&options);
        let url = self
            .entity_url(&resource_type, None, locale, &options)
            .await;
        let body = self.encode_body(body.into())?;

        let response = self
            .send_json_api(
                HttpMethod::Post,
                url,
                Some(body),
                &options,
                "Failed to create resource.",
            )
            .await?;

        if response.status == 201 {
            self.api.log().log(
                LogLevel::Verbose,
                &format!("Successfully created resource. Type: {resource_type}"),
            );
        } else {
            self.api.log().log(
                LogLevel::Error,
                &format!(
                    "Failed to create resource. Status: {} {}",
                    response.status, response.status_text
                ),
            );
        }

        self.mutation_result(response, 201, &options)
    }

    /// Updates a resource. A 200 response counts as success.
    ///
    /// # Errors
    ///
    /// Same as [`create_resource`](Self::create_resource).
    pub async fn update_resource(
        &self,
        resource_type: &str,
        resource_id: &str,
        body: impl Into<RequestBody>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();
        let resource_type = ResourceType::new(resource_type)?;
        let locale = self.api.resolve_locale(&options);
        let url = self
            .entity_url(&resource_type, Some(resource_id), locale, &options)
            .await;
        let body = self.encode_body(body.into())?;

        let response = self
            .send_json_api(
                HttpMethod::Patch,
                url,
                Some(body),
                &options,
                &format!("Failed to update resource. ResourceId: {resource_id},"),
            )
            .await?;

        if response.status == 200 {
            self.api.log().log(
                LogLevel::Verbose,
                &format!("Successfully updated resource. ResourceId: {resource_id}"),
            );
        } else {
            self.api.log().log(
                LogLevel::Error,
                &format!(
                    "Failed to update resource. ResourceId: {resource_id}, Status: {} {}",
                    response.status, response.status_text
                ),
            );
        }

        self.mutation_result(response, 200, &options)
    }

    /// Deletes a resource. A 204 response counts as success.
    ///
    /// On success the body is an empty string; otherwise it is the error
    /// document the server returned.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if `resource_type` is malformed
    /// - [`ClientError::Transport`] or [`ClientError::Authentication`] if the
    ///   request fails
    pub async fn delete_resource(
        &self,
        resource_type: &str,
        resource_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<DeleteResponse, ClientError> {
        let options = options.unwrap_or_default();
        let resource_type = ResourceType::new(resource_type)?;
        let locale = self.api.resolve_locale(&options);
        let url = self
            .entity_url(&resource_type, Some(resource_id), locale, &options)
            .await;

        let response = self
            .send_json_api(
                HttpMethod::Delete,
                url,
                None,
                &options,
                &format!("Failed to delete resource. ResourceId: {resource_id},"),
            )
            .await?;

        if response.status == 204 {
            self.api.log().log(
                LogLevel::Verbose,
                &format!("Successfully deleted resource. ResourceId: {resource_id}"),
            );
            return Ok(DeleteResponse {
                success: true,
                response,
                body: Value::String(String::new()),
            });
        }

        self.api.log().log(
            LogLevel::Error,
            &format!(
                "Failed to delete resource. ResourceId: {resource_id}, Status: {} {}",
                response.status, response.status_text
            ),
        );
        let body = lenient_json(&response);
        Ok(DeleteResponse {
            success: false,
            response,
            body,
        })
    }

    /// Fetches the resource a path points at.
    ///
    /// The path is translated by the router first (never in raw mode, and
    /// never under the caller's explicit cache key); the resolved entity is
    /// then fetched with [`get_resource`](Self::get_resource) using `options`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::PathNotResolved`] if the router does not know the path,
    ///   or the entity is not exposed through JSON:API
    /// - otherwise the same as [`get_resource`](Self::get_resource)
    pub async fn get_resource_by_path(
        &self,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();
        let router_options = RequestOptions {
            cache_key: None,
            raw_response: false,
            ..options.clone()
        };

        let translated = self
            .router()
            .translate_path(path, Some(router_options))
            .await?
            .into_json();

        match translated {
            RouterResponse::Resolved(resolved) => {
                let Some(jsonapi) = resolved.jsonapi else {
                    return Err(ClientError::PathNotResolved {
                        path: path.to_string(),
                        message: "The entity is not available through JSON:API.".to_string(),
                    });
                };
                self.get_resource(&jsonapi.resource_name, &resolved.entity.uuid, Some(options))
                    .await
            }
            RouterResponse::Unresolved(unresolved) => {
                self.api.log().log(
                    LogLevel::Verbose,
                    &format!("Path {path} did not resolve: {}", unresolved.message),
                );
                Err(ClientError::PathNotResolved {
                    path: path.to_string(),
                    message: unresolved.message,
                })
            }
        }
    }

    async fn get_entity(
        &self,
        resource_type: &ResourceType,
        resource_id: Option<&str>,
        options: &RequestOptions,
        action: &str,
    ) -> Result<ApiResponse, ClientError> {
        let locale = self.api.resolve_locale(options);
        let cache_key = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some(resource_type.entity_type_id()),
            bundle_id: Some(resource_type.bundle_id()),
            resource_id,
            locale,
            query_string: options.query(),
            cache_key: options.cache_key.as_deref(),
            ..Default::default()
        });

        if let Some(cached) = self.api.cached_json(&cache_key, options).await {
            return Ok(cached);
        }

        let url = self
            .entity_url(resource_type, resource_id, locale, options)
            .await;
        self.api
            .fetch_json(url, &cache_key, options, action, true)
            .await
    }

    /// Returns the URL for an entity operation, consulting the index first
    /// when index lookup is enabled.
    async fn entity_url(
        &self,
        resource_type: &ResourceType,
        resource_id: Option<&str>,
        locale: Option<&str>,
        options: &RequestOptions,
    ) -> String {
        let query_string = options.query();
        if self.index_lookup {
            if let Some(mut url) = self
                .lookup_collection_url(resource_type, locale, options)
                .await
            {
                if let Some(resource_id) = resource_id {
                    url.push('/');
                    url.push_str(resource_id);
                }
                if let Some(query_string) = query_string {
                    url.push('?');
                    url.push_str(query_string);
                }
                return url;
            }
        }

        self.create_url(&CacheKeyDescriptor {
            entity_type_id: Some(resource_type.entity_type_id()),
            bundle_id: Some(resource_type.bundle_id()),
            resource_id,
            locale,
            query_string,
            ..Default::default()
        })
    }

    async fn lookup_collection_url(
        &self,
        resource_type: &ResourceType,
        locale: Option<&str>,
        options: &RequestOptions,
    ) -> Option<String> {
        match self.fetch_index(locale, options).await {
            Ok(index) => index
                .href(&resource_type.to_string())
                .map(|href| href.trim_end_matches('/').to_string()),
            Err(error) => {
                tracing::warn!(%error, "Index lookup failed; using the default URL");
                self.api.log().log(
                    LogLevel::Warn,
                    &format!("Failed to fetch the index; using the default URL. Error: {error}"),
                );
                None
            }
        }
    }

    fn encode_body(&self, body: RequestBody) -> Result<String, ClientError> {
        match body {
            RequestBody::Text(text) => Ok(text),
            RequestBody::Json(value) => Ok(serde_json::to_string(&self.api.serialize(value)?)?),
        }
    }

    async fn send_json_api(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<String>,
        options: &RequestOptions,
        failure: &str,
    ) -> Result<HttpResponse, ClientError> {
        let mut builder = HttpRequest::builder(method, url)
            .header("Accept", JSON_API_MEDIA_TYPE)
            .credentials(options.credentials());
        builder = match body {
            Some(body) => builder.body(body).body_type(DataType::JsonApi),
            None => builder.header("Content-Type", JSON_API_MEDIA_TYPE),
        };
        self.api.fetch_or_log(builder.build()?, failure).await
    }

    /// Parses a create/update response. The serializer only sees documents
    /// returned with `success_status`.
    fn mutation_result(
        &self,
        response: HttpResponse,
        success_status: u16,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        let json = if response.status == success_status {
            self.api.deserialize(response.json()?)?
        } else {
            lenient_json(&response)
        };

        Ok(if options.raw_response {
            ApiResponse::Raw { response, json }
        } else {
            ApiResponse::Parsed(json)
        })
    }
}

impl AsRef<ApiClient> for JsonApiClient {
    fn as_ref(&self) -> &ApiClient {
        &self.api
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parses a body as JSON, falling back to the raw text.
fn lenient_json(response: &HttpResponse) -> Value {
    if response.text().is_empty() {
        return Value::String(String::new());
    }
    response
        .json()
        .unwrap_or_else(|_| Value::String(response.text().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;
    use std::collections::HashMap;

    fn client() -> JsonApiClient {
        JsonApiClient::new(
            &ClientConfig::builder()
                .base_url(BaseUrl::new("https://cms.example.com").unwrap())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_create_url_for_collection() {
        let url = client().create_url(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("recipe"),
            ..Default::default()
        });
        assert_eq!(url, "https://cms.example.com/jsonapi/node/recipe");
    }

    #[test]
    fn test_create_url_for_resource_with_locale_and_query() {
        let url = client().create_url(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("recipe"),
            resource_id: Some("35f7cd32"),
            locale: Some("es"),
            query_string: Some("include=uid"),
            ..Default::default()
        });
        assert_eq!(
            url,
            "https://cms.example.com/es/jsonapi/node/recipe/35f7cd32?include=uid"
        );
    }

    #[test]
    fn test_create_url_for_view() {
        let url = client().create_url(&CacheKeyDescriptor {
            view_name: Some("recipes"),
            view_display_id: Some("page_1"),
            query_string: Some("page=2"),
            ..Default::default()
        });
        assert_eq!(
            url,
            "https://cms.example.com/jsonapi/views/recipes/page_1?page=2"
        );
    }

    #[test]
    fn test_router_uses_router_prefix() {
        let router = client().router();
        assert_eq!(router.as_ref().api_prefix(), "router/translate-path");
    }

    #[test]
    fn test_lenient_json_falls_back_to_text() {
        let html = HttpResponse::new(500, "Internal Server Error", HashMap::new(), "<html>");
        assert_eq!(lenient_json(&html), Value::String("<html>".to_string()));

        let empty = HttpResponse::new(204, "No Content", HashMap::new(), "");
        assert_eq!(lenient_json(&empty), Value::String(String::new()));
    }

    #[tokio::test]
    async fn test_malformed_type_is_rejected_before_any_request() {
        let result = client().get_resource("nodePage", "1", None).await;
        assert!(matches!(result, Err(ClientError::Config(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("type must be in the format \"entityType--bundle\""));
    }
}
