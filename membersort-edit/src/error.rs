//! Error types for membersort-edit.
//!
//! Structural misuse of the editor (bad index, nothing selected) is not an error; those calls
//! return `false`. Errors are reserved for content that could not be persisted and read back.

use membersort_domain::OrderListError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A segment of an entry is empty or contains a separator.
    #[error("invalid entry token {token:?}: tokens must be non-empty and free of ' ' and ','")]
    InvalidToken { token: String },

    /// The entry has no kind segment.
    #[error("entry has no kind")]
    MissingKind,

    /// The list as a whole cannot be persisted.
    #[error(transparent)]
    OrderList(#[from] OrderListError),
}

pub type EditorResult<T> = Result<T, EditorError>;
