//! Error types for the EcoWeb client.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// A shared error type for every EcoWeb crate.
///
/// The first four variants form the user-facing taxonomy: local validation,
/// authentication, reads, and workflow mutations. The rest cover the guards
/// the client enforces on its own and the local storage plumbing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcowebError {
    /// Local form/field checks. Never reaches the network.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Login or registration failure.
    ///
    /// Invalid credentials and network failures are deliberately folded into
    /// the same variant.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network failure, non-2xx status, or unsuccessful envelope on a read.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Failure of a mutation (send, schedule, confirm, reject, archive, material changes).
    #[error("Action '{action}' failed: {message}")]
    Action {
        action: &'static str,
        message: String,
    },

    /// The requested action has no outgoing edge from the current status.
    #[error("Cannot {action} from status '{from}'")]
    InvalidTransition { from: String, action: &'static str },

    /// Another request on the same resource is still pending.
    #[error("Another request is already in flight for {resource}")]
    InFlight { resource: String },

    /// Entity not found with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EcowebError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates an Action error for the named action
    pub fn action(action: &'static str, message: impl Into<String>) -> Self {
        Self::Action {
            action,
            message: message.into(),
        }
    }

    /// Creates an InFlight error
    pub fn in_flight(resource: impl Into<String>) -> Self {
        Self::InFlight {
            resource: resource.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action { .. })
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this error should be shown to the user as a transient notification.
    ///
    /// Validation errors are rendered next to their fields instead.
    pub fn is_reportable(&self) -> bool {
        !self.is_validation()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<ValidationErrors> for EcowebError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<std::io::Error> for EcowebError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EcowebError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EcowebError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for EcowebError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EcowebError>`.
pub type Result<T> = std::result::Result<T, EcowebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_not_reportable() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "required");
        let err: EcowebError = errors.into();
        assert!(err.is_validation());
        assert!(!err.is_reportable());
    }

    #[test]
    fn test_action_error_display() {
        let err = EcowebError::action("schedule pickup", "HTTP 409");
        assert_eq!(err.to_string(), "Action 'schedule pickup' failed: HTTP 409");
        assert!(err.is_reportable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EcowebError = io.into();
        assert!(matches!(err, EcowebError::Io { .. }));
    }
}
