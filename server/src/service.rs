//! Todo Service
//!
//! Stateless operations over the store: each call resolves the shared
//! connection, performs one repository operation and returns the result.

use crate::domain::{
    DomainError, DomainResult, NewTodo, ReorderReport, Todo, TodoId, TodoPatch, TodoRef,
};
use crate::repository::{Repository, StoreHandle, TodoOrderingOperations, TodoRepository};

#[derive(Clone)]
pub struct TodoService {
    store: StoreHandle,
}

impl TodoService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    async fn repo(&self) -> DomainResult<TodoRepository> {
        match self.store.connect().await? {
            Some(conn) => Ok(TodoRepository::new(conn)),
            None => Err(DomainError::StoreUnavailable(
                "Database connection not available".to_string(),
            )),
        }
    }

    /// All records by priority desc, order asc, createdAt desc
    pub async fn list_all(&self) -> DomainResult<Vec<Todo>> {
        self.repo().await?.list().await
    }

    /// Validation runs before the store is touched.
    pub async fn create(&self, input: NewTodo) -> DomainResult<Todo> {
        let (title, priority) = input.validate()?;
        let repo = self.repo().await?;

        let todo = repo.create(&Todo::new(title, priority, 0)).await?;
        tracing::info!(id = %todo.id, order = todo.order, "Created todo");
        Ok(todo)
    }

    /// The store is resolved first so an unconfigured store wins over a bad id.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> DomainResult<Todo> {
        let repo = self.repo().await?;
        let id: TodoId = id.parse()?;
        let patch = patch.validate()?;
        if patch.is_empty() {
            tracing::debug!(%id, "Empty patch, touching updatedAt only");
        }

        repo.patch(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let repo = self.repo().await?;
        let id: TodoId = id.parse()?;
        repo.delete(id).await?;
        tracing::info!(%id, "Deleted todo");
        Ok(())
    }

    /// Resequence: each referenced record's order becomes its index in `refs`.
    pub async fn reorder_batch(&self, refs: Vec<TodoRef>) -> DomainResult<ReorderReport> {
        let report = self.repo().await?.reorder_batch(&refs).await?;
        if report.is_complete() {
            tracing::info!(updated = report.updated, "Reordered todos");
        } else {
            tracing::warn!(
                updated = report.updated,
                failed = report.failed.len(),
                "Reorder batch partially applied"
            );
        }
        Ok(report)
    }
}
