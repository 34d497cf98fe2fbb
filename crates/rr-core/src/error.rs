//! Unified error type for reelroom.
//!
//! Every request-level failure funnels into [`Error`], which carries enough
//! context for handlers to derive an HTTP status code via
//! [`Error::http_status`].

use std::fmt;

/// Unified error type covering all request-level failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested path resolves outside the library root.
    #[error("Path escapes library root: {path}")]
    OutOfBounds {
        /// The client-supplied relative path.
        path: String,
    },

    /// The requested entity could not be found, or has the wrong type.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "file", "directory").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The `Range` header is malformed, unsupported, or out of bounds.
    #[error("Range not satisfiable: {range} (size {size})")]
    RangeNotSatisfiable {
        /// The raw header value.
        range: String,
        /// Size of the file the range was checked against.
        size: u64,
    },

    /// Request or configuration data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::OutOfBounds { .. } => 403,
            Error::NotFound { .. } => 404,
            Error::RangeNotSatisfiable { .. } => 416,
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::OutOfBounds`].
    pub fn out_of_bounds(path: impl Into<String>) -> Self {
        Error::OutOfBounds { path: path.into() }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::RangeNotSatisfiable`].
    pub fn range_not_satisfiable(range: impl Into<String>, size: u64) -> Self {
        Error::RangeNotSatisfiable {
            range: range.into(),
            size,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
