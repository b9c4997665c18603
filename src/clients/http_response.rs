//! HTTP response types.
//!
//! [`HttpResponse`] holds the fully-read body in memory, so it can be cloned
//! before parsing and read again independently by the caller.
//! [`ApiResponse`] is what read operations return: either the parsed value,
//! or the raw response paired with the parsed value when raw mode was
//! requested.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// An HTTP response returned by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The HTTP reason phrase (e.g., "OK").
    pub status_text: String,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response. Header names are normalized to lowercase.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON. Can be called any number of times.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// The result of a read operation.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::ApiResponse;
/// use serde_json::json;
///
/// let response = ApiResponse::Parsed(json!({"data": []}));
/// assert!(response.response().is_none());
/// assert_eq!(response.json(), &json!({"data": []}));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse<T = Value> {
    /// The parsed (and optionally deserialized) body.
    Parsed(T),
    /// The untouched response alongside the parsed body.
    Raw {
        /// A copy of the response whose body has not been consumed.
        response: HttpResponse,
        /// The parsed (and optionally deserialized) body.
        json: T,
    },
}

impl<T> ApiResponse<T> {
    /// Returns the parsed body.
    #[must_use]
    pub const fn json(&self) -> &T {
        match self {
            Self::Parsed(json) | Self::Raw { json, .. } => json,
        }
    }

    /// Consumes the response, returning the parsed body.
    #[must_use]
    pub fn into_json(self) -> T {
        match self {
            Self::Parsed(json) | Self::Raw { json, .. } => json,
        }
    }

    /// Returns the raw response, if raw mode was requested.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Parsed(_) => None,
            Self::Raw { response, .. } => Some(response),
        }
    }

    /// Returns `true` if this is a raw-mode response.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw { .. })
    }

    /// Converts the parsed body, keeping the raw response if present.
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<ApiResponse<U>, E> {
        Ok(match self {
            Self::Parsed(json) => ApiResponse::Parsed(f(json)?),
            Self::Raw { response, json } => ApiResponse::Raw {
                response,
                json: f(json)?,
            },
        })
    }
}

impl ApiResponse<Value> {
    /// Deserializes the parsed body into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body does not match `U`.
    pub fn deserialize_into<U: DeserializeOwned>(self) -> Result<U, serde_json::Error> {
        serde_json::from_value(self.into_json())
    }
}
