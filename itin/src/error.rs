//! Error types for the itin library.
//!
//! This module provides a comprehensive error hierarchy for all operations
//! in the itin library, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with an itin error.
///
/// # Examples
///
/// ```
/// use itin::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the itin library.
///
/// This enum encompasses all possible error conditions that can occur
/// during itinerary operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A field-level validation failure with a human-readable reason.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A trip date-range change would orphan events on excluded days.
    #[error("date range conflict: {message}")]
    DateRangeConflict {
        /// Per-day summary of the events blocking the change.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A database error occurred within a named operation.
    #[error("{context}: {source}")]
    DatabaseContext {
        /// The operation that failed.
        context: String,
        /// The underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// A serialization error occurred while encoding output.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the invalid value.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found} ({detail})")]
    UnsupportedSchemaVersion {
        /// The schema version this client supports.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
        /// Whether the database is older or newer than the client.
        detail: String,
    },
}

impl Error {
    /// Builds a validation error for a named field.
    ///
    /// # Examples
    ///
    /// ```
    /// use itin::Error;
    ///
    /// let err = Error::validation("title", "title is required");
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a not-found error for a named resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use itin::Error;
    ///
    /// let err = Error::not_found("trip 42");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Wraps a database error with the name of the failing operation.
    #[must_use]
    pub fn database_context(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::DatabaseContext {
            context: context.into(),
            source,
        }
    }

    /// Classifies a failure to take the database write lock.
    ///
    /// A busy or locked response means the busy timeout elapsed while
    /// another writer held the database; `seconds` is the timeout that was
    /// in effect. Anything else passes through as a plain database error.
    #[must_use]
    pub(crate) fn lock_contention(source: rusqlite::Error, seconds: u64) -> Self {
        match source.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                Self::LockTimeout { seconds }
            }
            _ => Self::Database(source),
        }
    }

    /// Check if the error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use itin::Error;
    ///
    /// let err = Error::not_found("event 7");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a field validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use itin::Error;
    ///
    /// let err = Error::validation("trip_id", "trip_id is required");
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error is a trip date-range conflict.
    #[must_use]
    pub fn is_date_range_conflict(&self) -> bool {
        matches!(self, Self::DateRangeConflict { .. })
    }
}
