//! Todo resource core.
//!
//! # Overview
//! Validates create payloads, persists todos through a `DocumentStore`, and
//! applies sparse-merge updates. Nothing here knows about HTTP; an adapter
//! maps `TodoError` variants onto responses.
//!
//! # Design
//! - `TodoManager` is stateless and cheap to clone; it holds the store as
//!   `Arc<dyn DocumentStore>` injected at construction.
//! - Inbound payloads keep every field optional and are turned into a strict
//!   `NewTodo` by `validate_create` before any store call.
//! - Two stores ship with the crate: `MemoryStore` and the durable
//!   `FileStore`, whose connect/disconnect lifecycle is owned by the caller.

pub mod error;
pub mod manager;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{StoreError, TodoError, ValidationError};
pub use manager::TodoManager;
pub use store::{DocumentStore, FileStore, MemoryStore};
pub use types::{CreateTodo, NewTodo, Todo, TodoId, UpdateTodo};
pub use validate::validate_create;
