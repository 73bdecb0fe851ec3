//! Todo Ordering Operations
//!
//! Order values for new records and batch resequencing after a manual reorder.

use std::collections::HashSet;

use async_trait::async_trait;
use rusqlite::{params, Connection};

use super::todo_repo::TodoRepository;
use super::traits::TodoOrderingOperations;
use crate::domain::{now, DomainResult, ReorderFailure, ReorderReport, TodoRef};

/// `max(sort_order) + 1`, or 0 for an empty table
pub(super) fn next_order_in(conn: &Connection) -> DomainResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM todos",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(next)
}

#[async_trait]
impl TodoOrderingOperations for TodoRepository {
    async fn next_order(&self) -> DomainResult<i64> {
        let conn = self.conn.lock().await;
        next_order_in(&conn)
    }

    async fn reorder_batch(&self, refs: &[TodoRef]) -> DomainResult<ReorderReport> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let stamp = now().timestamp_millis();

        let mut report = ReorderReport::default();
        // `updated` counts records, so a repeated id counts once
        let mut touched = HashSet::new();
        for (index, todo_ref) in refs.iter().enumerate() {
            match todo_ref {
                TodoRef::Id(id) => {
                    let changed = tx.execute(
                        "UPDATE todos SET sort_order = ?, updated_at = ? WHERE id = ?",
                        params![index as i64, stamp, id.to_string()],
                    )?;
                    if changed == 0 {
                        report.failed.push(ReorderFailure {
                            index,
                            id: Some(id.to_string()),
                            error: "Todo not found".to_string(),
                        });
                    } else {
                        touched.insert(*id);
                    }
                }
                TodoRef::Invalid { raw, reason } => {
                    report.failed.push(ReorderFailure {
                        index,
                        id: raw.clone(),
                        error: reason.clone(),
                    });
                }
            }
        }

        tx.commit()?;
        report.updated = touched.len();
        Ok(report)
    }
}
