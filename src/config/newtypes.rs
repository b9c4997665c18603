//! Validated newtype wrappers for configuration and call input.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error
//! messages before any request is built.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Delimiter separating the two halves of a resource type or view identifier.
pub const TYPE_DELIMITER: &str = "--";

/// A validated base URL for all API requests.
///
/// The URL must carry a scheme and a host. A trailing slash is stripped so
/// endpoint paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::BaseUrl;
///
/// let url = BaseUrl::new("https://cms.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://cms.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "cms.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the URL is empty, or
    /// [`ConfigError::InvalidBaseUrl`] if it has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A parsed `entityType--bundle` resource type identifier.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::ResourceType;
///
/// let resource_type: ResourceType = "node--recipe".parse().unwrap();
/// assert_eq!(resource_type.entity_type_id(), "node");
/// assert_eq!(resource_type.bundle_id(), "recipe");
/// assert_eq!(resource_type.to_string(), "node--recipe");
///
/// assert!("nodeRecipe".parse::<ResourceType>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceType {
    entity_type_id: String,
    bundle_id: String,
}

impl ResourceType {
    /// Parses a resource type identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceType`] unless the identifier has a
    /// non-empty entity type and a non-empty bundle separated by `--`.
    pub fn new(value: &str) -> Result<Self, ConfigError> {
        split_pair(value)
            .map(|(entity_type_id, bundle_id)| Self {
                entity_type_id: entity_type_id.to_string(),
                bundle_id: bundle_id.to_string(),
            })
            .ok_or_else(|| ConfigError::InvalidResourceType {
                value: value.to_string(),
            })
    }

    /// Returns the entity type id (e.g., "node").
    #[must_use]
    pub fn entity_type_id(&self) -> &str {
        &self.entity_type_id
    }

    /// Returns the bundle id (e.g., "recipe").
    #[must_use]
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }
}

impl FromStr for ResourceType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{TYPE_DELIMITER}{}", self.entity_type_id, self.bundle_id)
    }
}

/// A parsed `viewName--displayId` view identifier.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::ViewId;
///
/// let view: ViewId = "article--page_1".parse().unwrap();
/// assert_eq!(view.view_name(), "article");
/// assert_eq!(view.display_id(), "page_1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewId {
    view_name: String,
    display_id: String,
}

impl ViewId {
    /// Parses a view identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidViewId`] unless the identifier has a
    /// non-empty view name and display id separated by `--`.
    pub fn new(value: &str) -> Result<Self, ConfigError> {
        split_pair(value)
            .map(|(view_name, display_id)| Self {
                view_name: view_name.to_string(),
                display_id: display_id.to_string(),
            })
            .ok_or_else(|| ConfigError::InvalidViewId {
                value: value.to_string(),
            })
    }

    /// Returns the view machine name.
    #[must_use]
    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    /// Returns the view display id.
    #[must_use]
    pub fn display_id(&self) -> &str {
        &self.display_id
    }
}

impl FromStr for ViewId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{TYPE_DELIMITER}{}", self.view_name, self.display_id)
    }
}

fn split_pair(value: &str) -> Option<(&str, &str)> {
    let (first, second) = value.split_once(TYPE_DELIMITER)?;
    if first.is_empty() || second.is_empty() || second.contains(TYPE_DELIMITER) {
        return None;
    }
    Some((first, second))
}
