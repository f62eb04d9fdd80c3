//! Error types for html-fluent.
//!
//! This module defines the errors returned by wrapper, resolver and query
//! operations. Advisory call sites never produce these; they log and skip.

/// Error type for element operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An element-like input could not be resolved to a concrete element.
    #[error("Invalid element reference: {0}")]
    InvalidReference(String),

    /// A CSS selector failed to parse.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The tag name is not a valid element name.
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    /// The element already carries an identifier.
    #[error("Element already has id {existing:?}, refusing to set {requested:?}")]
    DuplicateId {
        /// Identifier currently on the element.
        existing: String,
        /// Identifier the caller tried to set.
        requested: String,
    },

    /// The element belongs to a different page.
    #[error("<{child}> belongs to a different document")]
    WrongDocument {
        /// Tag name of the foreign element.
        child: String,
    },

    /// The insertion would make an element a descendant of itself.
    #[error("Cannot insert <{child}> into its own subtree")]
    HierarchyRequest {
        /// Tag name of the element being inserted.
        child: String,
    },
}

/// Result type alias for element operations.
pub type Result<T> = std::result::Result<T, Error>;
