//! # Specification Errors
//!
//! Errors raised while loading or building a specification version.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for specification operations
pub type SpecResult<T> = Result<T, SpecError>;

/// Specification loading errors
#[derive(Debug, Error)]
pub enum SpecError {
    // ==================
    // Version Errors
    // ==================

    /// Requested version does not exist in the store
    #[error("Unknown specification version: {0}")]
    UnknownVersion(String),

    /// The store holds no versions at all
    #[error("No specification versions available in {0}")]
    NoVersions(String),

    // ==================
    // Definition Errors
    // ==================

    /// Model definition does not exist
    #[error("Model {type_name} not found in specification version {version}")]
    ModelNotFound { version: String, type_name: String },

    /// Definition file is structurally invalid
    #[error("Malformed specification at {location}: {reason}")]
    Malformed { location: String, reason: String },

    /// Semantic type string cannot be parsed
    #[error("Invalid semantic type: '{0}'")]
    InvalidType(String),

    // ==================
    // Infrastructure Errors
    // ==================

    /// Definition file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Memo map lock poisoned by a panicking thread
    #[error("Specification registry lock poisoned")]
    LockPoisoned,
}

impl SpecError {
    /// Malformed definition at `location`
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error means "this version does not exist"
    pub fn is_unknown_version(&self) -> bool {
        matches!(self, SpecError::UnknownVersion(_) | SpecError::NoVersions(_))
    }
}
