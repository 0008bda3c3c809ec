//! Error types for the habit tracker library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for every store, marshalling and provider operation.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Rejected input (empty names, habits without a schedule, ...)
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A referenced entity does not exist
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// A persisted row could not be turned back into a domain value
    #[error("Failed to decode persisted field '{field}'")]
    Decoding { field: &'static str },

    /// The underlying SQLite store rejected a query or commit
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The command was committed but the view could not be rebuilt
    #[error("Changes were saved but the view could not be refreshed: {0}")]
    ViewRefresh(#[source] Box<TrackerError>),

    /// A sectioned-view accessor was called with a stale or invalid index
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
}

/// Builder for persistence errors with a context message.
pub struct PersistenceErrorBuilder {
    message: String,
}

impl PersistenceErrorBuilder {
    /// Create a new persistence error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TrackerError {
        TrackerError::Persistence {
            message: self.message,
            source,
        }
    }
}

/// Builder for input validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrackerError {
        TrackerError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrackerError {
    /// Creates a builder for persistence errors.
    pub fn persistence(message: impl Into<String>) -> PersistenceErrorBuilder {
        PersistenceErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::persistence(message).with_source(e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
