//! Todo HTTP Handlers
//!
//! One handler per route; each delegates to `TodoService` and maps the
//! outcome to a status code and JSON body.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::extract::ApiJson;
use super::AppState;
use crate::domain::{NewTodo, ReorderFailure, Todo, TodoPatch, TodoRef};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub message: String,
    pub updated: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<ReorderFailure>,
}

/// GET /todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state
        .service
        .list_all()
        .await
        .map_err(|e| ApiError::from_domain("fetch todos", e))?;
    Ok(Json(todos))
}

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state
        .service
        .create(input)
        .await
        .map_err(|e| ApiError::from_domain("create todo", e))?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<TodoPatch>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state
        .service
        .update(&id, patch)
        .await
        .map_err(|e| ApiError::from_domain("update todo", e))?;
    Ok(Json(todo))
}

/// DELETE /todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .service
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_domain("delete todo", e))?;
    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}

/// POST /todos/reorder
///
/// 200 when every reference was applied, 207 with the failed entries otherwise.
pub async fn reorder_todos(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<(StatusCode, Json<ReorderResponse>), ApiError> {
    let Some(entries) = body.get("todos").and_then(Value::as_array) else {
        return Err(ApiError::bad_request("Todos array is required"));
    };
    let refs = entries.iter().map(TodoRef::from_value).collect();

    let report = state
        .service
        .reorder_batch(refs)
        .await
        .map_err(|e| ApiError::from_domain("reorder todos", e))?;

    if report.is_complete() {
        Ok((
            StatusCode::OK,
            Json(ReorderResponse {
                message: "Todos reordered successfully".to_string(),
                updated: report.updated,
                failed: Vec::new(),
            }),
        ))
    } else {
        Ok((
            StatusCode::MULTI_STATUS,
            Json(ReorderResponse {
                message: "Some todos could not be reordered".to_string(),
                updated: report.updated,
                failed: report.failed,
            }),
        ))
    }
}
