//! HTTP surface for the todo service.
//!
//! # Design
//! `app` maps the repository contract onto routes and status codes; it is
//! the only place protocol translation happens. The router takes an
//! `Arc<TodoRepository>` so tests can run it in-process over the in-memory
//! store while `main` wires the SQLite store behind the same signature.
//!
//! Status mapping: absence is 404, a path/body id mismatch on PUT is 400
//! and short-circuits before any repository call, constraint violations are
//! 400, and a store outage is 503.

pub mod sqlite;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use todo_core::{CreateTodo, StoreError, TodoItem, TodoRepository, UpdateTodo};

type Repo = Arc<TodoRepository>;

pub fn app(repo: Repo) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(repo)
}

pub async fn run(listener: TcpListener, repo: Repo) -> Result<(), std::io::Error> {
    axum::serve(listener, app(repo)).await
}

async fn list_todos(State(repo): State<Repo>) -> Result<Json<Vec<TodoItem>>, StatusCode> {
    let todos = repo.get_all().await.map_err(error_status)?;
    Ok(Json(todos))
}

async fn get_todo(
    State(repo): State<Repo>,
    Path(id): Path<i64>,
) -> Result<Json<TodoItem>, StatusCode> {
    let todo = repo.get_by_id(id).await.map_err(error_status)?;
    todo.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_todo(
    State(repo): State<Repo>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TodoItem>), StatusCode> {
    let created = repo.create(input).await.map_err(error_status)?;
    let location = format!("/api/todos/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

async fn update_todo(
    State(repo): State<Repo>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<StatusCode, StatusCode> {
    if input.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    if repo.update(input).await.map_err(error_status)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn delete_todo(
    State(repo): State<Repo>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    if repo.delete(id).await.map_err(error_status)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Translate repository failures to protocol status codes.
fn error_status(err: StoreError) -> StatusCode {
    match &err {
        StoreError::ConstraintViolation(reason) => {
            tracing::warn!("rejected write: {reason}");
            StatusCode::BAD_REQUEST
        }
        StoreError::Unavailable(reason) => {
            tracing::error!("store unavailable: {reason}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
