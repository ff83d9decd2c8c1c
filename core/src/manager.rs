//! Todo resource manager: validate, persist and merge.
//!
//! # Design
//! `TodoManager` keeps no state of its own; the store it was built with owns
//! every record. Each method awaits the store and hands its result straight
//! back, so the caller decides how to render `TodoError`.
//!
//! # Concurrency
//! `update` is a read followed by a write with nothing held in between. Two
//! concurrent updates of the same todo can interleave and the later `save`
//! wins, dropping the other caller's change. This lost update is accepted;
//! callers that need stronger guarantees must serialize updates themselves.

use std::sync::Arc;

use crate::error::TodoError;
use crate::store::DocumentStore;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::validate::validate_create;

#[derive(Clone)]
pub struct TodoManager {
    store: Arc<dyn DocumentStore>,
}

impl TodoManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validate `payload` and insert it as a new todo.
    ///
    /// Invalid payloads never reach the store.
    pub async fn create(&self, payload: CreateTodo) -> Result<Todo, TodoError> {
        let fields = validate_create(payload).inspect_err(|err| {
            tracing::warn!(reason = %err, "rejected todo create");
        })?;
        let todo = self.store.insert(fields).await?;
        tracing::debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    /// Every stored todo, in store order.
    pub async fn list_all(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find(&self, id: &TodoId) -> Result<Todo, TodoError> {
        self.store.find_by_id(id).await?.ok_or(TodoError::NotFound)
    }

    /// Apply a sparse patch to an existing todo and save it.
    ///
    /// Only non-empty `title` and `content` values are merged; `author`,
    /// `tags` and `id` never change. The title length rule enforced on
    /// create is not re-checked here, so a patch may shorten a title below
    /// the create minimum.
    ///
    /// The todo is saved even when the patch is empty, and the stored record
    /// is returned unchanged.
    pub async fn update(&self, id: &TodoId, patch: UpdateTodo) -> Result<Todo, TodoError> {
        let mut todo = self.find(id).await?;
        patch.apply(&mut todo);
        self.store.save(&todo).await?;
        tracing::debug!(id = %todo.id, noop = patch.is_noop(), "updated todo");
        Ok(todo)
    }
}
