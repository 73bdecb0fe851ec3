//! Domain Layer
//!
//! Contains the Todo entity, its validation rules and the error taxonomy.

mod entity;
mod reorder;
mod todo;

pub use entity::{DomainError, DomainResult, Entity};
pub use reorder::{ReorderFailure, ReorderReport, TodoRef};
pub use todo::{
    now, validate_priority, validate_title, NewTodo, Todo, TodoId, TodoPatch, DEFAULT_PRIORITY,
    MAX_PRIORITY, MAX_TITLE_LEN, MIN_PRIORITY,
};
