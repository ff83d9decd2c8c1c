//! Domain types for the todo resource.
//!
//! # Design
//! Inbound payloads (`CreateTodo`, `UpdateTodo`) keep every field optional so
//! that presence is decided by the validator rather than by serde. Only
//! `NewTodo`, which the validator produces, is allowed to reach the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for TodoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A persisted todo record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
}

/// Request payload for creating a todo, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
}

/// Validated fields for a todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: String,
}

impl NewTodo {
    /// Attach a store-assigned id.
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            author: self.author,
        }
    }
}

/// Sparse patch for an existing todo.
///
/// Only `title` and `content` can change. A field that is absent, `null` or
/// an empty string leaves the stored value as it is, so a patch can never
/// clear a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateTodo {
    /// Merge the supplied fields into `todo`.
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = non_empty(&self.title) {
            todo.title = title.to_string();
        }
        if let Some(content) = non_empty(&self.content) {
            todo.content = content.to_string();
        }
    }

    /// True when applying the patch would change nothing.
    pub fn is_noop(&self) -> bool {
        non_empty(&self.title).is_none() && non_empty(&self.content).is_none()
    }
}

pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
