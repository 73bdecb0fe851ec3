//! UI Components
//!
//! Reusable Leptos components.

mod add_todo_form;
mod delete_confirm_button;
mod media_strip;
mod priority_selector;
mod todo_list_view;
mod todo_row;

pub use add_todo_form::AddTodoForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use media_strip::MediaStrip;
pub use priority_selector::PrioritySelector;
pub use todo_list_view::{DropSlot, TodoListView};
pub use todo_row::TodoRow;
