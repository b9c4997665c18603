//! Cache key derivation.
//!
//! Keys are built from the request-identifying fields of a call and joined
//! with `--`:
//!
//! ```text
//! [locale--](view--name[--display] | entityType[--bundle])[--resourceId][--sha256(queryString)]
//! ```
//!
//! An explicit key short-circuits everything else. Query strings are hashed
//! byte-for-byte, so reordering parameters produces a different key.

use sha2::{Digest, Sha256};

use crate::config::TYPE_DELIMITER;

/// Prefix namespacing view keys away from entity type keys.
pub const VIEW_KEY_PREFIX: &str = "view";

/// Request-identifying fields used to derive a cache key.
///
/// Empty strings are treated the same as absent fields.
///
/// # Example
///
/// ```rust
/// use drupal_api_client::cache::{derive_cache_key, CacheKeyDescriptor};
///
/// let key = derive_cache_key(&CacheKeyDescriptor {
///     locale: Some("es"),
///     entity_type_id: Some("node"),
///     bundle_id: Some("recipe"),
///     resource_id: Some("35f7cd32"),
///     ..Default::default()
/// });
/// assert_eq!(key, "es--node--recipe--35f7cd32");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheKeyDescriptor<'a> {
    /// Entity type id (e.g., "node").
    pub entity_type_id: Option<&'a str>,
    /// Bundle id (e.g., "recipe").
    pub bundle_id: Option<&'a str>,
    /// View machine name; takes precedence over the entity type.
    pub view_name: Option<&'a str>,
    /// View display id.
    pub view_display_id: Option<&'a str>,
    /// Individual resource id.
    pub resource_id: Option<&'a str>,
    /// Locale segment.
    pub locale: Option<&'a str>,
    /// URL-encoded query string.
    pub query_string: Option<&'a str>,
    /// Caller-supplied key that overrides derivation.
    pub cache_key: Option<&'a str>,
}

/// Derives a deterministic cache key.
#[must_use]
pub fn derive_cache_key(descriptor: &CacheKeyDescriptor<'_>) -> String {
    if let Some(key) = present(descriptor.cache_key) {
        return key.to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    if let Some(locale) = present(descriptor.locale) {
        parts.push(locale.to_string());
    }

    if let Some(view_name) = present(descriptor.view_name) {
        parts.push(VIEW_KEY_PREFIX.to_string());
        parts.push(view_name.to_string());
        if let Some(display_id) = present(descriptor.view_display_id) {
            parts.push(display_id.to_string());
        }
    } else {
        if let Some(entity_type_id) = present(descriptor.entity_type_id) {
            parts.push(entity_type_id.to_string());
        }
        if let Some(bundle_id) = present(descriptor.bundle_id) {
            parts.push(bundle_id.to_string());
        }
    }

    if let Some(resource_id) = present(descriptor.resource_id) {
        parts.push(resource_id.to_string());
    }

    if let Some(query_string) = present(descriptor.query_string) {
        parts.push(hash_query_string(query_string));
    }

    parts.join(TYPE_DELIMITER)
}

/// Returns the lowercase hex SHA-256 digest of a query string.
#[must_use]
pub fn hash_query_string(query_string: &str) -> String {
    hex::encode(Sha256::digest(query_string.as_bytes()))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_overrides_everything() {
        let key = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("page"),
            locale: Some("en"),
            query_string: Some("include=uid"),
            cache_key: Some("custom-key"),
            ..Default::default()
        });
        assert_eq!(key, "custom-key");
    }

    #[test]
    fn test_collection_key() {
        let key = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("recipe"),
            ..Default::default()
        });
        assert_eq!(key, "node--recipe");
    }

    #[test]
    fn test_view_keys_are_namespaced() {
        let view = derive_cache_key(&CacheKeyDescriptor {
            view_name: Some("article"),
            ..Default::default()
        });
        let entity = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("article"),
            ..Default::default()
        });
        assert_eq!(view, "view--article");
        assert_eq!(entity, "article");
        assert_ne!(view, entity);
    }

    #[test]
    fn test_view_key_with_display_and_locale() {
        let key = derive_cache_key(&CacheKeyDescriptor {
            view_name: Some("article"),
            view_display_id: Some("page_1"),
            locale: Some("es"),
            ..Default::default()
        });
        assert_eq!(key, "es--view--article--page_1");
    }

    #[test]
    fn test_query_string_is_sha256_hex() {
        let key = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("recipe"),
            query_string: Some("abc"),
            ..Default::default()
        });
        assert_eq!(
            key,
            "node--recipe--ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let descriptor = CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("recipe"),
            resource_id: Some("35f7cd32-2c54-49f2-8740-0b0ec2ba61f6"),
            query_string: Some("filter[title]=Deep&include=uid"),
            ..Default::default()
        };
        let first = derive_cache_key(&descriptor);
        for _ in 0..10 {
            assert_eq!(derive_cache_key(&descriptor), first);
        }
    }

    #[test]
    fn test_parameter_order_changes_key() {
        let a = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            query_string: Some("a=1&b=2"),
            ..Default::default()
        });
        let b = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            query_string: Some("b=2&a=1"),
            ..Default::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_fields_are_ignored() {
        let key = derive_cache_key(&CacheKeyDescriptor {
            entity_type_id: Some("node"),
            bundle_id: Some("page"),
            locale: Some(""),
            query_string: Some(""),
            cache_key: Some(""),
            ..Default::default()
        });
        assert_eq!(key, "node--page");
    }
}
