//! Repository façade over the store.
//!
//! # Design
//! `TodoRepository` is the sole data-access contract for the API layer. It
//! holds no cached entity state; every operation is a single store call, so
//! the store stays the source of truth. Both effectful dependencies — the
//! store and the clock — are injected trait objects, never ambient state.
//!
//! Validation happens here, before persistence, so a bad title never
//! reaches the store; the SQLite schema keeps matching CHECK constraints as
//! a defensive fallback only.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::StoreError;
use crate::store::TodoStore;
use crate::types::{CreateTodo, TodoItem, UpdateTodo, DESCRIPTION_MAX, TITLE_MAX};

/// CRUD façade over a [`TodoStore`].
pub struct TodoRepository {
    store: Arc<dyn TodoStore>,
    clock: Arc<dyn Clock>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn TodoStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All items, newest first. An empty list is a normal outcome.
    pub async fn get_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        self.store.find(id).await
    }

    /// Validate the input, stamp the creation time from the injected clock,
    /// and persist. The store assigns the id.
    pub async fn create(&self, input: CreateTodo) -> Result<TodoItem, StoreError> {
        validate(&input.title, input.description.as_deref())?;
        let item = TodoItem {
            id: 0,
            title: input.title,
            description: input.description,
            is_done: input.is_done,
            created_at: self.clock.now_utc(),
        };
        self.store.insert(item).await
    }

    /// Overwrite title/description/is_done of the target. Returns `false`
    /// without changing anything when the target does not exist. Id and
    /// creation time are never touched.
    pub async fn update(&self, input: UpdateTodo) -> Result<bool, StoreError> {
        validate(&input.title, input.description.as_deref())?;
        self.store.update(input).await
    }

    /// Returns whether an item existed and was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }
}

/// Field-level schema rules, checked once before any store write.
fn validate(title: &str, description: Option<&str>) -> Result<(), StoreError> {
    if title.is_empty() {
        return Err(StoreError::ConstraintViolation(
            "title must not be empty".to_string(),
        ));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(StoreError::ConstraintViolation(format!(
            "title exceeds {TITLE_MAX} characters"
        )));
    }
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(StoreError::ConstraintViolation(format!(
                "description exceeds {DESCRIPTION_MAX} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::Mutex;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    fn repo() -> TodoRepository {
        TodoRepository::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock(fixed_instant())),
        )
    }

    fn create_input(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            description: None,
            is_done: false,
        }
    }

    /// Clock that steps backwards one minute per call, so insertion order
    /// and timestamp order disagree.
    struct ReverseClock {
        next: Mutex<DateTime<Utc>>,
    }

    impl Clock for ReverseClock {
        fn now_utc(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap();
            let now = *next;
            *next -= Duration::minutes(1);
            now
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_stamps_clock_time() {
        let repo = repo();
        let created = repo.create(create_input("Buy milk")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, fixed_instant());

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let err = repo().create(create_input("")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn create_rejects_oversized_title() {
        let err = repo()
            .create(create_input(&"x".repeat(TITLE_MAX + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn create_accepts_title_at_limit() {
        let created = repo()
            .create(create_input(&"x".repeat(TITLE_MAX)))
            .await
            .unwrap();
        assert_eq!(created.title.chars().count(), TITLE_MAX);
    }

    #[tokio::test]
    async fn create_rejects_oversized_description() {
        let input = CreateTodo {
            title: "ok".to_string(),
            description: Some("y".repeat(DESCRIPTION_MAX + 1)),
            is_done: false,
        };
        let err = repo().create(input).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn update_nonexistent_returns_false_and_changes_nothing() {
        let repo = repo();
        let created = repo.create(create_input("Keep me")).await.unwrap();

        let changed = repo
            .update(UpdateTodo {
                id: created.id + 100,
                title: "Ghost".to_string(),
                description: None,
                is_done: true,
            })
            .await
            .unwrap();
        assert!(!changed);

        let all = repo.get_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields_only() {
        let repo = repo();
        let created = repo
            .create(CreateTodo {
                title: "Before".to_string(),
                description: Some("old".to_string()),
                is_done: false,
            })
            .await
            .unwrap();

        let changed = repo
            .update(UpdateTodo {
                id: created.id,
                title: "After".to_string(),
                description: Some("new".to_string()),
                is_done: true,
            })
            .await
            .unwrap();
        assert!(changed);

        let updated = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "After");
        assert_eq!(updated.description.as_deref(), Some("new"));
        assert!(updated.is_done);
    }

    #[tokio::test]
    async fn update_rejects_invalid_title() {
        let repo = repo();
        let created = repo.create(create_input("Valid")).await.unwrap();
        let err = repo
            .update(UpdateTodo {
                id: created.id,
                title: String::new(),
                description: None,
                is_done: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_absent() {
        let repo = repo();
        let created = repo.create(create_input("Gone soon")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent_in_outcome() {
        let repo = repo();
        let created = repo.create(create_input("Twice")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn get_all_orders_by_creation_time_not_insertion_order() {
        let repo = TodoRepository::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ReverseClock {
                next: Mutex::new(fixed_instant()),
            }),
        );

        // Each later insert gets an earlier timestamp.
        repo.create(create_input("newest")).await.unwrap();
        repo.create(create_input("middle")).await.unwrap();
        repo.create(create_input("oldest")).await.unwrap();

        let titles: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }
}
