//! Core error types

use thiserror::Error;

use crate::model::DocumentKind;
use daybook_parser::ParserError;

/// Error type for store, query and persistence operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: DocumentKind, id: String },

    #[error("Block not found: {id}")]
    BlockNotFound { id: String },

    #[error("Saved view not found: {id}")]
    ViewNotFound { id: String },

    #[error("Page title must not be empty")]
    EmptyTitle,

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a document lookup failure
    pub fn not_found(kind: DocumentKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a block lookup failure
    pub fn block_not_found(id: impl Into<String>) -> Self {
        Self::BlockNotFound { id: id.into() }
    }

    /// Check if the error is any kind of failed lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::BlockNotFound { .. } | Self::ViewNotFound { .. }
        )
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CoreError::not_found(DocumentKind::Page, "Foo");
        assert_eq!(err.to_string(), "page not found: Foo");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_is_not_a_lookup_failure() {
        assert!(!CoreError::Io("disk full".to_string()).is_not_found());
    }
}
