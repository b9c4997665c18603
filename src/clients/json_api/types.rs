//! Types used by the JSON:API client.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpResponse;

/// The JSON:API index document served at the API prefix.
///
/// Only `links` is read: it maps resource type identifiers to their
/// collection URLs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonApiIndex {
    /// Collection links keyed by resource type (plus `self`).
    #[serde(default)]
    pub links: HashMap<String, Link>,
}

impl JsonApiIndex {
    /// Returns the collection URL for a resource type, if listed.
    #[must_use]
    pub fn href(&self, resource_type: &str) -> Option<&str> {
        self.links
            .get(resource_type)
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

/// A JSON:API link object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The target URL.
    pub href: String,
    /// Link metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Body of a create or update call.
///
/// Text is sent as-is. JSON goes through the configured serializer's
/// `serialize` first.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A pre-encoded document.
    Text(String),
    /// A document to encode.
    Json(Value),
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        Self::Text(body)
    }
}

impl From<&str> for RequestBody {
    fn from(body: &str) -> Self {
        Self::Text(body.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(body: Value) -> Self {
        Self::Json(body)
    }
}

/// Outcome of a delete call.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteResponse {
    /// `true` when the server answered 204 No Content.
    pub success: bool,
    /// The untouched response.
    pub response: HttpResponse,
    /// An empty string on success, otherwise the parsed error document
    /// (or the raw text when it is not JSON).
    pub body: Value,
}
