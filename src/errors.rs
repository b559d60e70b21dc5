//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map onto the
//! outcomes callers need to distinguish: a missing record, a rejected request, a failed
//! store operation, and a refused authentication.

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the booking backend.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record that was looked up (e.g. "tour", "customer")
        entity: &'static str,
        /// Identifier that was looked up
        id: i64,
    },

    /// A required field is missing or malformed; raised before the store is touched
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The underlying store rejected an operation; the unit of work was rolled back
    #[error("Operation failed: {message}")]
    Persistence {
        /// Human-readable description of the store failure
        message: String,
    },

    /// Credentials, token, or session were not accepted
    #[error("Unauthorized: {reason}")]
    AuthFailure {
        /// Why authentication was refused
        reason: String,
    },

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::AuthFailure`] with the given reason.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::AuthFailure {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable kind, used in [`ErrorPayload`].
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Persistence { .. } => "persistence",
            Self::AuthFailure { .. } => "unauthorized",
            Self::Config { .. } => "config",
        }
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Persistence {
            message: value.to_string(),
        }
    }
}

/// Structured error record handed to the presentation layer in place of a created record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    /// See [`Error::kind`]
    pub kind: String,
    /// Human-readable message, never a backtrace
    pub error: String,
}

impl From<&Error> for ErrorPayload {
    fn from(value: &Error) -> Self {
        Self {
            kind: value.kind().to_string(),
            error: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
