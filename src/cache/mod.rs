//! Response caching.
//!
//! Clients accept any [`Cache`] implementation. The cache stores no metadata
//! of its own; eviction and expiry are up to the implementation.
//! [`MemoryCache`] is a ready-made in-process store.
//!
//! [`CacheGateway`] wraps the optional cache with debug logging and the
//! store gate: a response is only stored when a cache is configured, caching
//! was not disabled for the call, and the status code is below 400.
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::cache::{Cache, MemoryCache};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let cache = MemoryCache::new();
//! cache.set("node--page", json!({"data": []})).await;
//! assert_eq!(cache.get("node--page").await, Some(json!({"data": []})));
//! # });
//! ```

mod key;

pub use key::{derive_cache_key, hash_query_string, CacheKeyDescriptor, VIEW_KEY_PREFIX};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::logging::{DebugLog, LogLevel};

/// Status codes at or above this value are never cached.
pub const MIN_UNCACHEABLE_STATUS: u16 = 400;

/// A key/value store for parsed responses.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`.
    async fn set(&self, key: &str, value: Value);
}

/// In-memory [`Cache`] with no eviction.
#[derive(Debug, Default)]
pub struct MemoryCache {
    store: RwLock<HashMap<String, Value>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        self.store.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: Value) {
        self.store.write().await.insert(key.to_string(), value);
    }
}

/// Per-call inputs to the store gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreGate {
    /// Status code of the response being stored.
    pub status: u16,
    /// Whether caching was disabled for the call.
    pub disable_cache: bool,
}

/// Null-safe, logging wrapper around an optional [`Cache`].
#[derive(Clone, Default)]
pub struct CacheGateway {
    cache: Option<Arc<dyn Cache>>,
    log: DebugLog,
}

impl CacheGateway {
    /// Creates a gateway over an optional cache.
    #[must_use]
    pub fn new(cache: Option<Arc<dyn Cache>>, log: DebugLog) -> Self {
        Self { cache, log }
    }

    /// Returns `true` if a cache is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.cache.is_some()
    }

    /// Looks up `key`. Returns `None` without error when no cache is configured.
    ///
    /// Only a stored JSON `null` counts as a miss. `false`, `0` and `""` are
    /// valid documents and are returned as hits.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let cache = self.cache.as_ref()?;

        self.log
            .log(LogLevel::Verbose, &format!("Checking cache for key {key}..."));
        match cache.get(key).await {
            Some(value) if !value.is_null() => {
                self.log
                    .log(LogLevel::Verbose, &format!("Cache hit for key {key}"));
                Some(value)
            }
            _ => {
                self.log
                    .log(LogLevel::Verbose, &format!("Cache miss for key {key}"));
                None
            }
        }
    }

    /// Stores `value` under `key` if the gate allows it.
    ///
    /// Returns `true` when the value was handed to the cache.
    pub async fn maybe_store(&self, key: &str, value: &Value, gate: StoreGate) -> bool {
        let Some(cache) = self.cache.as_ref() else {
            return false;
        };
        if gate.disable_cache || gate.status >= MIN_UNCACHEABLE_STATUS {
            return false;
        }

        cache.set(key, value.clone()).await;
        self.log
            .log(LogLevel::Verbose, &format!("Stored response under key {key}"));
        true
    }
}

impl fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheGateway")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::tests::RecordingLogger;
    use serde_json::json;

    fn gateway(cache: Arc<MemoryCache>) -> CacheGateway {
        CacheGateway::new(Some(cache), DebugLog::default())
    }

    const OK: StoreGate = StoreGate {
        status: 200,
        disable_cache: false,
    };

    #[tokio::test]
    async fn test_get_without_cache_returns_none() {
        let gateway = CacheGateway::default();
        assert!(!gateway.is_configured());
        assert_eq!(gateway.get("node--page").await, None);
        assert!(!gateway.maybe_store("node--page", &json!({}), OK).await);
    }

    #[tokio::test]
    async fn test_store_then_get() {
        let cache = Arc::new(MemoryCache::new());
        let gateway = gateway(cache.clone());

        assert!(gateway.maybe_store("node--page", &json!({"data": []}), OK).await);
        assert_eq!(gateway.get("node--page").await, Some(json!({"data": []})));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_error_status_is_never_stored() {
        let cache = Arc::new(MemoryCache::new());
        let gateway = gateway(cache.clone());

        for status in [400, 401, 404, 500] {
            let gate = StoreGate {
                status,
                disable_cache: false,
            };
            assert!(!gateway.maybe_store("k", &json!({"errors": []}), gate).await);
        }
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_disable_cache_skips_store() {
        let cache = Arc::new(MemoryCache::new());
        let gateway = gateway(cache.clone());
        let gate = StoreGate {
            status: 200,
            disable_cache: true,
        };

        assert!(!gateway.maybe_store("k", &json!(1), gate).await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_null_value_is_a_miss() {
        let cache = Arc::new(MemoryCache::new());
        cache.set("k", Value::Null).await;
        assert_eq!(gateway(cache).get("k").await, None);
    }

    #[tokio::test]
    async fn test_logs_check_hit_and_miss_when_debug_enabled() {
        let recorder = Arc::new(RecordingLogger::default());
        let cache = Arc::new(MemoryCache::new());
        let gateway = CacheGateway::new(Some(cache), DebugLog::new(recorder.clone(), true));

        gateway.get("k").await;
        gateway.maybe_store("k", &json!(1), OK).await;
        gateway.get("k").await;

        let messages: Vec<String> = recorder
            .messages
            .lock()
            .unwrap()
            .iter()
            .map(|(level, message)| {
                assert_eq!(*level, LogLevel::Verbose);
                message.clone()
            })
            .collect();
        assert_eq!(
            messages,
            vec![
                "Checking cache for key k...",
                "Cache miss for key k",
                "Stored response under key k",
                "Checking cache for key k...",
                "Cache hit for key k",
            ]
        );
    }

    #[tokio::test]
    async fn test_only_null_counts_as_miss() {
        let cache = Arc::new(MemoryCache::new());
        let gateway = gateway(cache.clone());

        cache.set("null", Value::Null).await;
        cache.set("false", json!(false)).await;
        cache.set("zero", json!(0)).await;
        cache.set("empty", json!("")).await;

        assert_eq!(gateway.get("null").await, None);
        assert_eq!(gateway.get("false").await, Some(json!(false)));
        assert_eq!(gateway.get("zero").await, Some(json!(0)));
        assert_eq!(gateway.get("empty").await, Some(json!("")));
    }
}
