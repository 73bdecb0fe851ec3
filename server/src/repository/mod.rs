//! Repository Layer
//!
//! Data access abstractions and the SQLite implementation.

mod db;
mod todo_ordering;
mod todo_repo;
mod traits;


pub use db::{open_store, SharedConnection, StoreHandle, StoreTarget, StoreTargetError};
pub use todo_repo::TodoRepository;
pub use traits::{Repository, TodoOrderingOperations};
