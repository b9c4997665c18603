//! Configuration error types for the Drupal API client.
//!
//! This module contains the error type raised when a client is constructed
//! with invalid input, or when a per-call argument such as a resource type
//! identifier is malformed.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any network I/O. Error messages are designed
//! to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a client or validating call input.
///
/// Each variant is fatal to the call that produced it and is raised before
/// any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL was empty.
    #[error("baseUrl is required")]
    EmptyBaseUrl,

    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://cms.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A resource type identifier was not in `entityType--bundle` form.
    #[error("type must be in the format \"entityType--bundle\" (received '{value}')")]
    InvalidResourceType {
        /// The identifier that was provided.
        value: String,
    },

    /// A view identifier was not in `viewName--displayId` form.
    #[error("view must be in the format \"viewName--displayId\" (received '{value}')")]
    InvalidViewId {
        /// The identifier that was provided.
        value: String,
    },

    /// An OAuth strategy was configured without a client id or secret.
    #[error("credentials.clientId or credentials.clientSecret is missing on the authentication option.")]
    MissingOAuthCredentials,

    /// A password grant was configured without a username or password.
    #[error("credentials.username or credentials.password is missing for the password grant.")]
    MissingPasswordGrantCredentials,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_base_url_error_message() {
        assert_eq!(ConfigError::EmptyBaseUrl.to_string(), "baseUrl is required");
    }

    #[test]
    fn test_invalid_resource_type_error_message() {
        let error = ConfigError::InvalidResourceType {
            value: "nodePage".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("type must be in the format \"entityType--bundle\""));
        assert!(message.contains("nodePage"));
    }

    #[test]
    fn test_missing_oauth_credentials_error_message() {
        let message = ConfigError::MissingOAuthCredentials.to_string();
        assert!(message.contains("clientId"));
        assert!(message.contains("clientSecret"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyBaseUrl;
        let _: &dyn std::error::Error = &error;
    }
}
