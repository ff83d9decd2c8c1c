//! Error types for the todo core.
//!
//! # Design
//! `Validation` and `NotFound` are outcomes the caller must tell apart to
//! pick a response. Everything the store reports is wrapped untouched in
//! `Store`; the core never interprets or retries it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::TodoId;

/// A create payload broke one of the todo invariants.
///
/// The `Display` text is the message shown to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and author are required")]
    MissingRequiredField,

    #[error("Title must be between 5 and 40 characters")]
    TitleLengthOutOfRange,
}

/// Failures reported by a `DocumentStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store file {path} is corrupt: duplicate id {id}")]
    DuplicateId { path: PathBuf, id: TodoId },

    #[error("failed to encode todo records: {0}")]
    Encode(#[source] serde_json::Error),

    /// `save` was called for a record the store never issued.
    #[error("no stored todo with id {0}")]
    Missing(TodoId),

    #[error("store is disconnected")]
    Disconnected,
}

/// Errors returned by `TodoManager` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Todo not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}
