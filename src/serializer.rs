//! Pluggable response (de)serialization.
//!
//! A [`Serializer`] lets callers reshape JSON:API documents, for example to
//! flatten `attributes` into plain objects. Both methods default to passing
//! the value through untouched, so an implementation only needs to override
//! the direction it cares about.
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::{Serializer, SerializerError};
//! use serde_json::Value;
//!
//! /// Returns only the `data` member of every document.
//! struct DataOnly;
//!
//! impl Serializer for DataOnly {
//!     fn deserialize(&self, body: Value) -> Result<Value, SerializerError> {
//!         Ok(body.get("data").cloned().unwrap_or(Value::Null))
//!     }
//! }
//! ```

use serde_json::Value;

/// Error type returned by serializer implementations.
pub type SerializerError = Box<dyn std::error::Error + Send + Sync>;

/// Transforms response bodies after parsing and request bodies before sending.
pub trait Serializer: Send + Sync {
    /// Transforms a parsed response body.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the body cannot be transformed.
    fn deserialize(&self, body: Value) -> Result<Value, SerializerError> {
        Ok(body)
    }

    /// Transforms a request body before it is encoded.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the body cannot be transformed.
    fn serialize(&self, body: Value) -> Result<Value, SerializerError> {
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Passthrough;
    impl Serializer for Passthrough {}

    struct Uppercase;
    impl Serializer for Uppercase {
        fn deserialize(&self, body: Value) -> Result<Value, SerializerError> {
            match body {
                Value::String(s) => Ok(Value::String(s.to_uppercase())),
                _ => Err("expected a string".into()),
            }
        }
    }

    #[test]
    fn test_default_methods_pass_through() {
        let body = json!({"data": {"type": "node--page"}});
        assert_eq!(Passthrough.deserialize(body.clone()).unwrap(), body);
        assert_eq!(Passthrough.serialize(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_overridden_direction_only() {
        assert_eq!(Uppercase.deserialize(json!("a")).unwrap(), json!("A"));
        assert!(Uppercase.deserialize(json!(1)).is_err());
        assert_eq!(Uppercase.serialize(json!(1)).unwrap(), json!(1));
    }
}
