//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Todo;

/// Client-side state; `todos` is kept in display order
#[derive(Clone, Debug, Store)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    /// True until the first successful list fetch
    pub loading: bool,
    /// Message shown in the error banner
    pub error: Option<String>,
}

impl TodoState {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

// ========================
// List Helpers
// ========================

/// Replace the entry with the same id. Returns false if none matched.
pub fn replace_by_id(todos: &mut [Todo], updated: Todo) -> bool {
    match todos.iter_mut().find(|t| t.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_by_id(todos: &mut Vec<Todo>, id: &str) {
    todos.retain(|t| t.id != id);
}

// ========================
// Store Helper Functions
// ========================

pub fn store_add_todo(store: &TodoStore, todo: Todo) {
    store.todos().write().push(todo);
}

/// Update a todo in the store by ID
pub fn store_update_todo(store: &TodoStore, updated: Todo) {
    replace_by_id(&mut store.todos().write(), updated);
}

/// Remove a todo from the store by ID
pub fn store_remove_todo(store: &TodoStore, id: &str) {
    remove_by_id(&mut store.todos().write(), id);
}
