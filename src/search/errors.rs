//! # Search Errors
//!
//! Error taxonomy for the autocomplete index.
//!
//! `Corrupt` is internal: the query engine logs and skips corrupt members
//! instead of returning it to callers.

use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Autocomplete index errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Missing product fields, non-positive limit, negative offset
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Index store unreachable, closed, or the call timed out
    #[error("Index unavailable: {0}")]
    Unavailable(String),

    /// Caller cancelled the operation
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// A stored member could not be decoded
    #[error("Corrupt index entry: {0}")]
    Corrupt(String),

    /// Index and catalog fallback both failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SearchError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a cancelled error
    pub fn cancelled(op: impl Into<String>) -> Self {
        Self::Cancelled(op.into())
    }

    /// Create a corrupt entry error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Unavailable(_) => "UNAVAILABLE",
            Self::Cancelled(_) => "CANCELLED",
            Self::Corrupt(_) => "CORRUPT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::Cancelled(_) => 499,
            Self::Unavailable(_) => 503,
            Self::Corrupt(_) | Self::Internal(_) => 500,
        }
    }

    /// Whether the catalog fallback should be consulted
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
