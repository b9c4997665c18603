//! HTTP request types handed to a [`Transport`](crate::clients::Transport).
//!
//! This module provides the [`HttpRequest`] type and its builder. Requests
//! carry a fully-built URL; the clients are responsible for composing it.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and token requests.
    Post,
    /// HTTP PATCH method for updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON:API content type (`application/vnd.api+json`).
    JsonApi,
    /// JSON content type (`application/json`).
    Json,
    /// Form content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::JsonApi => "application/vnd.api+json",
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

/// Whether a request may carry credentials.
///
/// [`Credentials::Omit`] suppresses both the `Authorization` header and
/// any cookie credentials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Attach the configured authorization and cookies.
    #[default]
    Include,
    /// Send the request anonymously.
    Omit,
}

/// An HTTP request to be sent by a transport.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::clients::{Credentials, DataType, HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Post, "https://cms.example.com/jsonapi/node/page")
///     .body(r#"{"data":{"type":"node--page"}}"#)
///     .body_type(DataType::JsonApi)
///     .credentials(Credentials::Omit)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Post);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// The serialized request body, if any.
    pub body: Option<String>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Headers to include in the request.
    pub headers: HashMap<String, String>,
    /// Whether credentials may be attached.
    pub credentials: Credentials,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Shorthand for a GET request with no extra options.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            http_method: HttpMethod::Get,
            url: url.into(),
            body: None,
            body_type: None,
            headers: HashMap::new(),
            credentials: Credentials::Include,
        }
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` is `Post` or `Patch` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Patch) && self.body.is_none()
        {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Returns the value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<String>,
    body_type: Option<DataType>,
    headers: HashMap<String, String>,
    credentials: Credentials,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            body_type: None,
            headers: HashMap::new(),
            credentials: Credentials::Include,
        }
    }

    /// Sets the serialized request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    ///
    /// This also sets the `Content-Type` header.
    #[must_use]
    pub fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self.headers.insert(
            "Content-Type".to_string(),
            body_type.as_content_type().to_string(),
        );
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the credentials mode.
    #[must_use]
    pub const fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            body_type: self.body_type,
            headers: self.headers,
            credentials: self.credentials,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_data_type_content_type() {
        assert_eq!(
            DataType::JsonApi.as_content_type(),
            "application/vnd.api+json"
        );
        assert_eq!(
            DataType::FormUrlEncoded.as_content_type(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://cms.example.com/jsonapi")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert!(request.body.is_none());
        assert_eq!(request.credentials, Credentials::Include);
    }

    #[test]
    fn test_body_type_sets_content_type_header() {
        let request = HttpRequest::builder(HttpMethod::Post, "https://cms.example.com/oauth/token")
            .body("grant_type=client_credentials")
            .body_type(DataType::FormUrlEncoded)
            .build()
            .unwrap();

        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_verify_requires_body_for_post_and_patch() {
        let result = HttpRequest::builder(HttpMethod::Post, "https://cms.example.com").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));

        let result = HttpRequest::builder(HttpMethod::Patch, "https://cms.example.com").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "patch"
        ));
    }

    #[test]
    fn test_verify_requires_body_type_when_body_present() {
        let mut request = HttpRequest::get("https://cms.example.com");
        request.body = Some("{}".to_string());

        assert!(matches!(
            request.verify(),
            Err(InvalidHttpRequestError::MissingBodyType)
        ));
    }

    #[test]
    fn test_delete_without_body_is_valid() {
        let request = HttpRequest::builder(HttpMethod::Delete, "https://cms.example.com/x")
            .credentials(Credentials::Omit)
            .build()
            .unwrap();
        assert_eq!(request.credentials, Credentials::Omit);
    }
}
