//! Domain core for the todo service.
//!
//! # Overview
//! Entity types, the store contract, and the repository façade, free of any
//! HTTP or database dependency. The server crate supplies the axum surface
//! and the SQLite store; tests run the same repository against the bundled
//! in-memory store.
//!
//! # Design
//! - `TodoRepository` is the sole data-access contract: validate, stamp the
//!   creation time, make exactly one store call.
//! - Every source of non-determinism is an injected capability — time via
//!   the `Clock` trait, persistence via the `TodoStore` trait — so each can
//!   be substituted in tests.
//! - Absence is a normal outcome (`Option`/`bool`); only schema rejections
//!   and store connectivity failures are errors.

pub mod clock;
pub mod error;
pub mod repository;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use repository::TodoRepository;
pub use store::{MemoryStore, TodoStore};
pub use types::{CreateTodo, TodoItem, UpdateTodo};
