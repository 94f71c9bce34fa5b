//! Error types for the tip pool distribution engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while allocating a tip pool or
//! serving the surrounding API.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the tip pool distribution engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roles.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roles.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A role weight in the configuration was invalid.
    #[error("Invalid role weight for '{role}': {message}")]
    InvalidRoleWeight {
        /// The role label with the invalid weight.
        role: String,
        /// A description of what made the weight invalid.
        message: String,
    },

    /// The allocation input was invalid.
    ///
    /// This is the only failure mode of the allocator itself: an empty
    /// pool, no eligible contributions, or a duplicate employee id.
    #[error("Invalid allocation input: {reason}")]
    InvalidInput {
        /// A human-readable reason the input was rejected.
        reason: String,
    },

    /// A saved distribution record was not found.
    #[error("Distribution record not found: {id}")]
    RecordNotFound {
        /// The id of the record that was not found.
        id: Uuid,
    },

    /// The persistence layer failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Creates an [`EngineError::InvalidInput`] with the given reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(error: sqlx::Error) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        Self::Storage {
            message: format!("payload serialization failed: {}", error),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
