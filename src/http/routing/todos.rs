use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, post};
use axum::{Json, Router};

use crate::application::todo_service::TodoService;
use crate::domain::todo::{CreateTodo, Todo, TodoId};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route("/todos/:id", delete(delete_todo::<S>))
        .with_state(state)
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    // Reject malformed bodies before any storage access.
    let Json(input) = payload.map_err(|rej| ApiError::Validation(rej.body_text()))?;
    let todo = state.service.create(input).await?;
    Ok(Json(todo))
}

async fn list_todos<S: TodoService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.service.list().await?;
    Ok(Json(todos))
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = TodoId::parse(&id)
        .ok_or_else(|| ApiError::Validation(format!("invalid todo id: {id}")))?;
    if state.service.delete(id).await? {
        Ok(Json(serde_json::json!({ "message": "Todo successfully deleted" })))
    } else {
        Err(ApiError::NotFound)
    }
}
