//! SQLite-backed store.
//!
//! # Design
//! One table, one pool, no migrations framework: `connect` applies the
//! schema idempotently on startup. Timestamps are stored as RFC 3339 TEXT
//! in UTC, which sorts lexicographically in timestamp order, so the list
//! query can order in SQL.
//!
//! The schema repeats the field limits as CHECK constraints. The
//! repository validates before calling the store, so these only fire if a
//! write bypasses it; when they do, the database error is surfaced as a
//! `ConstraintViolation` rather than an outage.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use todo_core::{StoreError, TodoItem, TodoStore, UpdateTodo};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT    NOT NULL CHECK (length(title) > 0 AND length(title) <= 200),
    description TEXT             CHECK (description IS NULL OR length(description) <= 500),
    is_done     INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL
)";

/// Store backed by a SQLite connection pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    is_done: bool,
    created_at: DateTime<Utc>,
}

impl From<TodoRow> for TodoItem {
    fn from(row: TodoRow) -> Self {
        TodoItem {
            id: row.id,
            title: row.title,
            description: row.description,
            is_done: row.is_done,
            created_at: row.created_at,
        }
    }
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and apply the
    /// schema.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(store_error)?
            .create_if_missing(true);
        // An in-memory database exists per connection, so a pool of them
        // would be a pool of unrelated empty databases.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(store_error)?;
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn insert(&self, item: TodoItem) -> Result<TodoItem, StoreError> {
        let result = sqlx::query(
            "INSERT INTO todos (title, description, is_done, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.is_done)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(TodoItem {
            id: result.last_insert_rowid(),
            ..item
        })
    }

    async fn find(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, is_done, created_at \
             FROM todos WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(TodoItem::from))
    }

    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, is_done, created_at \
             FROM todos ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(TodoItem::from).collect())
    }

    async fn update(&self, item: UpdateTodo) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?1, description = ?2, is_done = ?3 \
             WHERE id = ?4",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.is_done)
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map sqlx failures onto the store error taxonomy: schema rejections are
/// constraint violations, everything else is an outage.
fn store_error(err: sqlx::Error) -> StoreError {
    use sqlx::error::ErrorKind;

    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::CheckViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::UniqueViolation => StoreError::ConstraintViolation(db.message().to_string()),
            _ => StoreError::Unavailable(err.to_string()),
        },
        _ => StoreError::Unavailable(err.to_string()),
    }
}
