//! HTTP Layer
//!
//! axum routes bridging the front end to the todo service.

mod error;
mod extract;
mod todo_api;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::service::TodoService;

pub use error::ApiError;
pub use extract::ApiJson;
pub use todo_api::{MessageResponse, ReorderResponse};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
}

impl AppState {
    pub fn new(service: TodoService) -> Self {
        Self { service }
    }
}

/// Routes for the todo API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(todo_api::list_todos).post(todo_api::create_todo))
        .route("/todos/reorder", post(todo_api::reorder_todos))
        .route(
            "/todos/{id}",
            put(todo_api::update_todo).delete(todo_api::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
