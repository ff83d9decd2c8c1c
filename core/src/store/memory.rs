use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::StoreError;
use crate::types::{NewTodo, Todo, TodoId};

/// Id-indexed records that remember insertion order.
#[derive(Debug, Clone, Default)]
pub(super) struct Records {
    by_id: HashMap<TodoId, Todo>,
    order: Vec<TodoId>,
}

impl Records {
    /// Index loaded records. Fails with the first id that appears twice.
    pub(super) fn from_todos(todos: Vec<Todo>) -> Result<Self, TodoId> {
        let mut records = Self::default();
        for todo in todos {
            let id = todo.id;
            if records.by_id.contains_key(&id) {
                return Err(id);
            }
            records.insert(todo);
        }
        Ok(records)
    }

    /// Issue an id that is not used by any stored record.
    pub(super) fn next_id(&self) -> TodoId {
        loop {
            let id = TodoId::generate();
            if !self.by_id.contains_key(&id) {
                return id;
            }
        }
    }

    pub(super) fn insert(&mut self, todo: Todo) {
        if self.by_id.insert(todo.id, todo.clone()).is_none() {
            self.order.push(todo.id);
        }
    }

    pub(super) fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.by_id.get(id)
    }

    pub(super) fn replace(&mut self, todo: &Todo) -> Result<(), StoreError> {
        let slot = self.by_id.get_mut(&todo.id).ok_or(StoreError::Missing(todo.id))?;
        *slot = todo.clone();
        Ok(())
    }

    pub(super) fn len(&self) -> usize {
        self.order.len()
    }

    pub(super) fn to_vec(&self) -> Vec<Todo> {
        self.order.iter().filter_map(|id| self.by_id.get(id).cloned()).collect()
    }
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut records = self.records.write().await;
        let todo = todo.into_todo(records.next_id());
        records.insert(todo.clone());
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.records.read().await.to_vec())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn save(&self, todo: &Todo) -> Result<(), StoreError> {
        self.records.write().await.replace(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            content: String::new(),
            tags: Vec::new(),
            author: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(new_todo("First todo")).await.unwrap();
        let b = store.insert(new_todo("Second todo")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for title in ["one todo", "two todo", "three todo", "four todo"] {
            ids.push(store.insert(new_todo(title)).await.unwrap().id);
        }
        let listed: Vec<TodoId> = store.find_all().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn find_by_id_unknown_is_none() {
        let store = MemoryStore::new();
        assert!(store.find_by_id(&TodoId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_in_place() {
        let store = MemoryStore::new();
        let first = store.insert(new_todo("First todo")).await.unwrap();
        let second = store.insert(new_todo("Second todo")).await.unwrap();

        let mut changed = first.clone();
        changed.title = "Changed title".to_string();
        store.save(&changed).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![changed, second]);
    }

    #[tokio::test]
    async fn save_unknown_id_is_missing() {
        let store = MemoryStore::new();
        let ghost = new_todo("Ghost todo").into_todo(TodoId::generate());
        let err = store.save(&ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(id) if id == ghost.id));
    }
}
