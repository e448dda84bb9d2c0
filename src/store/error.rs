use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation {
        field: &'static str,
        message: String,
    },
    NotFound {
        query: String,
    },
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation { field, message } => {
                write!(f, "validation failed for {}: {}", field, message)
            }
            StoreError::NotFound { query } => write!(f, "no record found for {}", query),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}
