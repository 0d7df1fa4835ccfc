//! Domain types for the todo service.
//!
//! # Design
//! `TodoItem` is the persisted entity; `CreateTodo` and `UpdateTodo` are the
//! payloads the API layer deserializes. The DTOs carry only the fields a
//! caller may set — `CreateTodo` has no `id` or `createdAt` at all, so a
//! caller can never smuggle either past the repository. Wire names are
//! camelCase (`isDone`, `createdAt`); serde ignores unknown body fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length in characters, enforced by the repository and
/// mirrored by the store schema.
pub const TITLE_MAX: usize = 200;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 500;

/// A single todo item with store-assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new todo. The store assigns the id and
/// the repository stamps the creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_done: bool,
}

/// Request payload for updating an existing todo. Carries the target id and
/// the full replacement values for the three mutable fields; `createdAt` is
/// never part of an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_done: bool,
}
