//! Error types for the Astra client.

use thiserror::Error;

/// A shared error type for the entire Astra client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Validation variants (`EmptyQuery`, `NoFileSelected`, `NotAuthenticated`)
/// are raised *before* any backend request is issued; callers treat them as
/// a quiet no-op rather than a failure notification.
#[derive(Error, Debug, Clone)]
pub enum AstraError {
    /// Entity not found with type information
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Transport-level failure talking to the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Backend returned a non-success status; `message` carries the
    /// backend-provided detail when one was present in the body
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submitted query was empty or whitespace-only
    #[error("query must not be empty")]
    EmptyQuery,

    /// Upload requested without a readable file
    #[error("no file selected")]
    NoFileSelected,

    /// Operation requires a signed-in user
    #[error("not signed in")]
    NotAuthenticated,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AstraError {
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

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Backend error
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
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

    /// Check if this is a client-side validation error.
    ///
    /// Validation errors never reach the wire; the UI suppresses the
    /// generic failure notification for them.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery | Self::NoFileSelected | Self::NotAuthenticated
        )
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came back from the backend
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// The message shown in a failure notification.
    ///
    /// Backend errors surface the backend-provided detail; everything else
    /// falls back to the error's display form.
    pub fn notification(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AstraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AstraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AstraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AstraError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Backend {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, AstraError>`.
pub type Result<T> = std::result::Result<T, AstraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(AstraError::EmptyQuery.is_validation());
        assert!(AstraError::NoFileSelected.is_validation());
        assert!(AstraError::NotAuthenticated.is_validation());
        assert!(!AstraError::backend(500, "boom").is_validation());
    }

    #[test]
    fn test_backend_notification_uses_detail() {
        let err = AstraError::backend(401, "Invalid credentials");
        assert_eq!(err.notification(), "Invalid credentials");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AstraError = io.into();
        assert!(matches!(err, AstraError::Io { .. }));
    }
}
