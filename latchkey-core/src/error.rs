//! Error types for store operations.

use std::fmt;

use thiserror::Error;

use crate::backend::BackendStatus;

/// The store operation that was running when a backend fault occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Reading,
    Updating,
    Deleting,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reading => "reading",
            Self::Updating => "updating",
            Self::Deleting => "deleting",
        };
        f.write_str(name)
    }
}

/// Error type for every store operation.
#[derive(Debug, Error)]
pub enum KeychainError {
    /// No item matched the query. Readers treat this as "no value".
    #[error("no keychain item found")]
    ItemNotFound,

    /// An item was found but its payload has the wrong shape.
    #[error("unexpected data in keychain item: {message}")]
    UnexpectedData { message: String },

    /// The backend reported any other non-success status.
    #[error("unhandled backend status {status} while {operation}")]
    Backend {
        status: BackendStatus,
        operation: Operation,
    },
}

impl KeychainError {
    pub fn unexpected_data(message: impl Into<String>) -> Self {
        Self::UnexpectedData {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound)
    }

    /// Raw backend status code, if this error came from the backend.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            Self::Backend { status, .. } => Some(status.code()),
            _ => None,
        }
    }
}
