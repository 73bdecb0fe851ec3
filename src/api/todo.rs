//! Todo Endpoints

use gloo_net::http::Request;
use serde::Serialize;

use super::{read_error, read_json, url, ApiError};
use crate::models::{NewTodo, ReorderFailure, ReorderResponse, Todo, TodoPatch};

const MULTI_STATUS: u16 = 207;

#[derive(Serialize)]
struct ReorderEntry<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct ReorderArgs<'a> {
    todos: Vec<ReorderEntry<'a>>,
}

/// Result of a reorder request that reached the server
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    Complete { updated: usize },
    Partial { updated: usize, failed: Vec<ReorderFailure> },
}

pub async fn list_todos() -> Result<Vec<Todo>, ApiError> {
    let response = Request::get(&url("/todos"))
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

pub async fn create_todo(input: &NewTodo) -> Result<Todo, ApiError> {
    let response = Request::post(&url("/todos"))
        .json(input)
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

pub async fn update_todo(id: &str, patch: &TodoPatch) -> Result<Todo, ApiError> {
    let response = Request::put(&url(&format!("/todos/{}", id)))
        .json(patch)
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

pub async fn delete_todo(id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&url(&format!("/todos/{}", id)))
        .send()
        .await
        .map_err(ApiError::transport)?;
    if response.ok() {
        Ok(())
    } else {
        Err(read_error(response).await)
    }
}

/// Send the full sequence; each todo's order becomes its index.
pub async fn reorder_todos(todos: &[Todo]) -> Result<ReorderOutcome, ApiError> {
    let args = ReorderArgs {
        todos: todos.iter().map(|t| ReorderEntry { id: &t.id }).collect(),
    };
    let response = Request::post(&url("/todos/reorder"))
        .json(&args)
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;

    let partial = response.status() == MULTI_STATUS;
    let body: ReorderResponse = read_json(response).await?;
    if partial || !body.failed.is_empty() {
        Ok(ReorderOutcome::Partial {
            updated: body.updated,
            failed: body.failed,
        })
    } else {
        Ok(ReorderOutcome::Complete {
            updated: body.updated,
        })
    }
}
