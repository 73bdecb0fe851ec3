//! Todo Repository - Core CRUD Operations
//!
//! SQLite-backed implementation of `Repository<Todo>`.
//! Ordering operations live in `todo_ordering`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use super::db::SharedConnection;
use super::todo_ordering::next_order_in;
use super::traits::Repository;
use crate::domain::{now, DomainError, DomainResult, Todo, TodoId, TodoPatch};

const TODO_COLUMNS: &str =
    "id, title, completed, priority, notes, media, sort_order, created_at, updated_at";

/// SQLite implementation of Todo repository
#[derive(Clone)]
pub struct TodoRepository {
    pub(super) conn: SharedConnection,
}

impl TodoRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Read, patch and write back one record under a single lock.
    ///
    /// `updated_at` is refreshed even when the patch is empty.
    pub async fn patch(&self, id: TodoId, patch: TodoPatch) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;

        let mut todo = fetch_one(&conn, id)?
            .ok_or_else(|| DomainError::NotFound("Todo not found".to_string()))?;
        todo.apply(patch);
        todo.updated_at = now();
        write_row(&conn, &todo)?;

        Ok(todo)
    }
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    /// Insert a record. Its `order` is always assigned by the store.
    async fn create(&self, entity: &Todo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;

        let mut todo = entity.clone();
        todo.order = next_order_in(&conn)?;

        conn.execute(
            "INSERT INTO todos (id, title, completed, priority, notes, media, sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                todo.id.to_string(),
                todo.title,
                todo.completed,
                todo.priority,
                todo.notes,
                serde_json::to_string(&todo.media)?,
                todo.order,
                todo.created_at.timestamp_millis(),
                todo.updated_at.timestamp_millis(),
            ],
        )?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: TodoId) -> DomainResult<Option<Todo>> {
        let conn = self.conn.lock().await;
        fetch_one(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM todos ORDER BY priority DESC, sort_order ASC, created_at DESC, rowid DESC",
            TODO_COLUMNS
        ))?;
        let mut rows = stmt.query([])?;

        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(row_to_todo(row)?);
        }
        Ok(todos)
    }

    async fn update(&self, entity: &Todo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;

        let mut todo = entity.clone();
        todo.updated_at = now();
        write_row(&conn, &todo)?;

        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let removed = conn.execute("DELETE FROM todos WHERE id = ?", params![id.to_string()])?;
        if removed == 0 {
            return Err(DomainError::NotFound("Todo not found".to_string()));
        }
        Ok(())
    }
}

fn fetch_one(conn: &Connection, id: TodoId) -> DomainResult<Option<Todo>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM todos WHERE id = ?", TODO_COLUMNS))?;
    let mut rows = stmt.query(params![id.to_string()])?;
    let todo = rows.next()?.map(row_to_todo).transpose()?;
    Ok(todo)
}

/// Write every patchable column. `sort_order` and `created_at` are left alone.
fn write_row(conn: &Connection, todo: &Todo) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE todos SET title = ?, completed = ?, priority = ?, notes = ?, media = ?, updated_at = ? WHERE id = ?",
        params![
            todo.title,
            todo.completed,
            todo.priority,
            todo.notes,
            serde_json::to_string(&todo.media)?,
            todo.updated_at.timestamp_millis(),
            todo.id.to_string(),
        ],
    )?;

    if changed == 0 {
        return Err(DomainError::NotFound("Todo not found".to_string()));
    }
    Ok(())
}

fn millis_to_datetime(millis: i64) -> DomainResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DomainError::Store(format!("Invalid timestamp {}", millis)))
}

/// Convert a database row to Todo
fn row_to_todo(row: &Row<'_>) -> DomainResult<Todo> {
    let id: String = row.get(0)?;
    let media: String = row.get(5)?;

    Ok(Todo {
        id: id
            .parse()
            .map_err(|_| DomainError::Store(format!("Corrupt todo id {}", id)))?,
        title: row.get(1)?,
        completed: row.get(2)?,
        priority: row.get(3)?,
        notes: row.get(4)?,
        media: serde_json::from_str(&media)?,
        order: row.get(6)?,
        created_at: millis_to_datetime(row.get(7)?)?,
        updated_at: millis_to_datetime(row.get(8)?)?,
    })
}
