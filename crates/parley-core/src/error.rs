//! Error types for the Parley training engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Parley application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Taxonomy notes:
/// - `Validation` and `NotFound` are caller faults (4xx-equivalent) and
///   must never be retried.
/// - `Timeout` is raised when the enrichment deadline wins the generation
///   race; the background warm-up path degrades it to a `Pending` status
///   instead of surfacing it.
/// - `Dependency` covers store/provider failures. Blocking paths surface
///   it to the caller; the background enrichment path swallows and logs it.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ParleyError {
    /// Missing or malformed required field (caller's fault, never retried)
    #[error("Validation error: field '{field}': {message}")]
    Validation { field: String, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// A dependency exceeded its deadline
    #[error("Timeout: {operation} exceeded its deadline")]
    Timeout { operation: String },

    /// Keyed store or external provider error
    #[error("Dependency error: {0}")]
    Dependency(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParleyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Creates a Dependency error
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::Dependency(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this error is the caller's fault (4xx-equivalent).
    ///
    /// Such errors must be surfaced verbatim and never retried.
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParleyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParleyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParleyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ParleyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (for the application-layer edges)
impl From<anyhow::Error> for ParleyError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ParleyError>`.
pub type Result<T> = std::result::Result<T, ParleyError>;
