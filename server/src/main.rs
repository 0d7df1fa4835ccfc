//! Service entry point.
//!
//! # Design
//! All wiring lives here: read the environment, open the store, assemble
//! the repository, bind, serve. Nothing below this layer touches the
//! environment. `PORT` defaults to 3000 and `DATABASE_URL` to an
//! in-memory database so the service runs with zero configuration.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_core::{SystemClock, TodoRepository};
use todo_server::sqlite::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

    let store = SqliteStore::connect(&database_url)
        .await
        .with_context(|| format!("opening store at {database_url}"))?;
    let repo = Arc::new(TodoRepository::new(
        Arc::new(store),
        Arc::new(SystemClock),
    ));

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on {addr}");

    todo_server::run(listener, repo).await?;
    Ok(())
}
