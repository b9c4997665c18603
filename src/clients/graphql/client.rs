//! GraphQL client implementation.

use serde_json::{json, Value};

use crate::clients::{
    ApiClient, ApiResponse, ClientError, DataType, HttpMethod, HttpRequest, RequestOptions,
};
use crate::config::{ClientConfig, DEFAULT_GRAPHQL_PREFIX};

/// Client for a GraphQL endpoint.
///
/// Queries share the credential handling, logging and transport of the other
/// clients. They are never cached.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use drupal_api_client::{ClientConfig, GraphqlClient};
/// use serde_json::json;
///
/// let client = GraphqlClient::new(&ClientConfig::new("https://cms.example.com")?);
///
/// let response = client
///     .query(
///         "query ($id: ID!) { article(id: $id) { title } }",
///         Some(json!({ "id": "1" })),
///         None,
///     )
///     .await?;
///
/// // GraphQL errors come back with HTTP 200 in the body
/// if let Some(errors) = response.json().get("errors") {
///     println!("GraphQL errors: {errors}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    api: ApiClient,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a GraphQL client. The prefix defaults to `graphql`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config, DEFAULT_GRAPHQL_PREFIX),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.api.base_url(), self.api.api_prefix())
    }

    /// Executes a query.
    ///
    /// Only `raw_response` and `disable_authentication` apply from `options`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] or [`ClientError::Authentication`] if the
    ///   request fails
    /// - [`ClientError::Json`] if the body is not JSON
    ///
    /// GraphQL-level errors are returned in the body, not as `Err`.
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ClientError> {
        let options = options.unwrap_or_default();

        let mut body = json!({ "query": query });
        if let Some(variables) = variables {
            body["variables"] = variables;
        }

        let request = HttpRequest::builder(HttpMethod::Post, self.endpoint())
            .body(body.to_string())
            .body_type(DataType::Json)
            .header("Accept", DataType::Json.as_content_type())
            .credentials(options.credentials())
            .build()?;

        let response = self
            .api
            .fetch_or_log(request, "Failed to run query.")
            .await?;

        let json = response.json()?;
        Ok(if options.raw_response {
            ApiResponse::Raw { response, json }
        } else {
            ApiResponse::Parsed(json)
        })
    }
}

impl AsRef<ApiClient> for GraphqlClient {
    fn as_ref(&self) -> &ApiClient {
        &self.api
    }
}
