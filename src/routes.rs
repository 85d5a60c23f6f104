//! HTTP layer: the axum router, the four CRUD handlers, and the CORS layer.
//!
//! Handlers stay thin; every one is a direct call into [`TodoStore`] with
//! the result serialized back out.

use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowHeaders, CorsLayer};
use tracing::{debug, warn};

use crate::config::CorsConfig;
use crate::error::ApiError;
use crate::model::{Todo, TodoDraft, TodoList};
use crate::store::TodoStore;

pub fn router(store: TodoStore, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            axum::routing::put(update_todo).delete(delete_todo),
        )
        .layer(cors_layer(cors))
        .with_state(store)
}

/// Credentialed CORS restricted to the configured origin allow-list.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
}

async fn list_todos(State(store): State<TodoStore>) -> Result<Json<TodoList>, ApiError> {
    let todos = store.list_all().await?;
    Ok(Json(TodoList { todos }))
}

async fn create_todo(
    State(store): State<TodoStore>,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<Todo>, ApiError> {
    let id = store.insert(&draft.task, draft.completed).await?;
    debug!("created todo {id}");
    Ok(Json(Todo {
        id: Some(id),
        task: draft.task,
        completed: draft.completed,
    }))
}

async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<i64>,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<Todo>, ApiError> {
    if !store.update_by_id(id, &draft.task, draft.completed).await? {
        return Err(ApiError::NotFound);
    }

    // Re-read so the response reflects the row as stored.
    let todo = store.fetch_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<i64>,
) -> Result<Json<TodoList>, ApiError> {
    if !store.delete_by_id(id).await? {
        return Err(ApiError::NotFound);
    }

    let todos = store.list_all().await?;
    Ok(Json(TodoList { todos }))
}
