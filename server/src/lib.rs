//! HTTP adapter for the todo core.
//!
//! Maps requests onto `TodoManager` calls and renders results with the
//! status codes callers rely on: 201 for create, 200 for reads and updates,
//! 400 for validation failures, 404 for unknown todos.

pub mod config;
pub mod error;

use std::collections::HashMap;
use std::future::Future;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use todo_core::{CreateTodo, Todo, TodoError, TodoId, TodoManager, UpdateTodo};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

pub use config::{Config, ConfigError, StoreKind};

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoManager,
}

impl AppState {
    pub fn new(todos: TodoManager) -> Self {
        Self { todos }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/students", get(students))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `state` on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index() -> &'static str {
    "Hello guys, welcome to Opolo Hub!"
}

async fn about(
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> &'static str {
    tracing::info!(%uri, %method, ?query, "about page requested");
    "This is the about page"
}

async fn students() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Page Not Found")
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos.list_all().await?))
}

async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.todos.create(payload_or_default(body)?).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.todos.find(&id).await?))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.todos.update(&id, payload_or_default(body)?).await?))
}

/// A request that carries no JSON body is treated as an empty payload.
/// A JSON body that fails to parse is still rejected.
fn payload_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

/// An id the store could never have issued names no todo.
fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|_| ApiError::from(TodoError::NotFound))
}
