//! Store contract and the in-memory implementation.
//!
//! # Design
//! `TodoStore` is the persistence boundary: a narrow, object-safe async
//! trait so the repository and router never depend on a concrete backend.
//! The SQLite implementation lives in the server crate (it owns the sqlx
//! dependency); [`MemoryStore`] lives here so tests and ephemeral runs can
//! wire the whole stack without a database.
//!
//! Absence is a normal result (`Option`/`bool`); only schema rejections and
//! connectivity failures are errors.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::{TodoItem, UpdateTodo};

/// Durable keyed collection of todo items.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persist a new item, assigning its id. Any id on `item` is ignored.
    async fn insert(&self, item: TodoItem) -> Result<TodoItem, StoreError>;

    /// Primary-key lookup.
    async fn find(&self, id: i64) -> Result<Option<TodoItem>, StoreError>;

    /// All items, newest first (`created_at` descending, ties broken by id
    /// descending). Recomputed fresh on every call.
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError>;

    /// Overwrite title/description/is_done of the row with `item.id` in one
    /// atomic step. Returns whether the row existed.
    async fn update(&self, item: UpdateTodo) -> Result<bool, StoreError>;

    /// Remove the row with `id`. Returns whether a row existed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// In-memory store backed by a `BTreeMap` behind an async `RwLock`.
///
/// Ids count up from 1 and are never reused, matching the AUTOINCREMENT
/// behavior of the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    items: BTreeMap<i64, TodoItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, mut item: TodoItem) -> Result<TodoItem, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        item.id = inner.next_id;
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let inner = self.inner.read().await;
        let mut items: Vec<TodoItem> = inner.items.values().cloned().collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }

    async fn update(&self, item: UpdateTodo) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.items.get_mut(&item.id) {
            Some(existing) => {
                existing.title = item.title;
                existing.description = item.description;
                existing.is_done = item.is_done;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.remove(&id).is_some())
    }
}
