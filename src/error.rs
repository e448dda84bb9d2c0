use std::fmt;

use crate::auth::{AuthError, Operation, Permission, PermissionDenied};
use crate::store::StoreError;

/// Crate-level error taxonomy. Every variant except `Internal` reflects a
/// caller-correctable condition; none are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShelfError {
    Validation {
        field: &'static str,
        message: String,
    },
    NotFound {
        query: String,
    },
    PermissionDenied {
        operation: Operation,
        required: Permission,
    },
    AuthenticationFailed(String),
    Internal(&'static str),
}

impl fmt::Display for ShelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShelfError::Validation { field, message } => {
                write!(f, "validation failed for {}: {}", field, message)
            }
            ShelfError::NotFound { query } => write!(f, "no record found for {}", query),
            ShelfError::PermissionDenied {
                operation,
                required,
            } => write!(f, "permission denied: {} requires {}", operation, required),
            ShelfError::AuthenticationFailed(message) => {
                write!(f, "authentication failed: {}", message)
            }
            ShelfError::Internal(message) => write!(f, "internal error: {}", message),
        }
    }
}

impl std::error::Error for ShelfError {}

impl From<StoreError> for ShelfError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { field, message } => ShelfError::Validation { field, message },
            StoreError::NotFound { query } => ShelfError::NotFound { query },
            StoreError::LockPoisoned(_) => ShelfError::Internal("store lock poisoned"),
        }
    }
}

impl From<PermissionDenied> for ShelfError {
    fn from(err: PermissionDenied) -> Self {
        ShelfError::PermissionDenied {
            operation: err.operation,
            required: err.required,
        }
    }
}

impl From<AuthError> for ShelfError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::UnknownToken => {
                ShelfError::AuthenticationFailed(err.to_string())
            }
            AuthError::UsernameTaken(_) | AuthError::InvalidUsername(_) => ShelfError::Validation {
                field: "username",
                message: err.to_string(),
            },
            AuthError::Hash(_) => ShelfError::Internal("password hashing failed"),
            AuthError::LockPoisoned(_) => ShelfError::Internal("auth state lock poisoned"),
        }
    }
}
