//! Document store port for todo records.
//!
//! # Design
//! The manager only depends on this trait, held as `Arc<dyn DocumentStore>`
//! so the process entry point decides which backend to open. Connection
//! lifecycle belongs to the concrete store, not to the trait.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{NewTodo, Todo, TodoId};

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable keyed storage for todo records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new record and return it with its assigned id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// All records, in insertion order.
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError>;

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError>;

    /// Replace the record that has the same id as `todo`.
    ///
    /// Returns `StoreError::Missing` if no such record exists.
    async fn save(&self, todo: &Todo) -> Result<(), StoreError>;
}
