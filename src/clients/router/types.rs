//! Router response documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer of the path translation endpoint.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::clients::router::RouterResponse;
/// use serde_json::json;
///
/// let response: RouterResponse = serde_json::from_value(json!({
///     "message": "Unable to resolve path /missing.",
///     "details": "None of the available methods were able to find a match for this path."
/// }))
/// .unwrap();
///
/// assert!(!response.is_resolved());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouterResponse {
    /// The path points at an entity.
    Resolved(ResolvedPath),
    /// No entity matched the path.
    Unresolved(UnresolvedPath),
}

impl RouterResponse {
    /// Returns `true` for a resolved path.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A path that resolved to an entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPath {
    /// Canonical URL of the entity.
    pub resolved: String,
    /// Whether the path is the site's front page.
    #[serde(default)]
    pub is_home_path: bool,
    /// The entity the path points at.
    pub entity: RouterEntity,
    /// The entity label.
    #[serde(default)]
    pub label: Option<String>,
    /// Where the entity is exposed through JSON:API, if it is.
    #[serde(default)]
    pub jsonapi: Option<JsonApiTarget>,
    /// Any extra metadata, such as deprecation notices.
    #[serde(default)]
    pub meta: Option<Value>,
    /// Set when the path was reached through a redirect.
    #[serde(default)]
    pub redirect: Option<Value>,
}

/// Entity information in a resolved path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouterEntity {
    /// The entity UUID.
    pub uuid: String,
    /// The entity type id (e.g., "node").
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
    /// The bundle id (e.g., "recipe").
    #[serde(default)]
    pub bundle: Option<String>,
    /// The numeric or string id.
    #[serde(default)]
    pub id: Option<Value>,
    /// The canonical URL.
    #[serde(default)]
    pub canonical: Option<String>,
    /// The language of the entity.
    #[serde(default)]
    pub langcode: Option<String>,
    /// The alias the entity was found under.
    #[serde(default)]
    pub path: Option<String>,
}

/// JSON:API location of a resolved entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonApiTarget {
    /// Resource type identifier, e.g. `node--recipe`.
    pub resource_name: String,
    /// URL of the individual resource.
    #[serde(default)]
    pub individual: Option<String>,
    /// Path prefix of the JSON:API endpoint.
    #[serde(default)]
    pub path_prefix: Option<String>,
    /// Base path of the JSON:API endpoint.
    #[serde(default)]
    pub base_path: Option<String>,
    /// URL of the JSON:API index.
    #[serde(default)]
    pub entry_point: Option<String>,
}

/// A path the router could not resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedPath {
    /// Why the path did not resolve.
    pub message: String,
    /// Additional explanation.
    #[serde(default)]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolved_document_parses() {
        let response: RouterResponse = serde_json::from_value(json!({
            "resolved": "https://cms.example.com/recipes/fiery-chili-sauce",
            "isHomePath": false,
            "entity": {
                "canonical": "https://cms.example.com/recipes/fiery-chili-sauce",
                "type": "node",
                "bundle": "recipe",
                "id": "3",
                "uuid": "da1ad1f8-b0e2-4a8d-a4d4-bd8e3ffa4e5b",
                "langcode": "en",
                "path": "/recipes/fiery-chili-sauce"
            },
            "label": "Fiery chili sauce",
            "jsonapi": {
                "individual": "https://cms.example.com/jsonapi/node/recipe/da1ad1f8-b0e2-4a8d-a4d4-bd8e3ffa4e5b",
                "resourceName": "node--recipe",
                "pathPrefix": "jsonapi",
                "basePath": "/jsonapi",
                "entryPoint": "https://cms.example.com/jsonapi"
            },
            "meta": {"deprecated": {}}
        }))
        .unwrap();

        let RouterResponse::Resolved(resolved) = response else {
            panic!("expected a resolved path");
        };
        assert_eq!(resolved.entity.uuid, "da1ad1f8-b0e2-4a8d-a4d4-bd8e3ffa4e5b");
        assert_eq!(resolved.entity.bundle.as_deref(), Some("recipe"));
        assert_eq!(resolved.jsonapi.unwrap().resource_name, "node--recipe");
        assert!(!resolved.is_home_path);
    }

    #[test]
    fn test_unresolved_document_parses() {
        let response: RouterResponse = serde_json::from_value(json!({
            "message": "Unable to resolve path /missing.",
            "details": "None of the available methods were able to find a match for this path."
        }))
        .unwrap();

        assert_eq!(
            response,
            RouterResponse::Unresolved(UnresolvedPath {
                message: "Unable to resolve path /missing.".to_string(),
                details: Some(
                    "None of the available methods were able to find a match for this path."
                        .to_string()
                ),
            })
        );
    }
}
