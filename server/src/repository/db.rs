//! Database Connection and Setup
//!
//! Resolves the configured store target, lazily opens a single shared SQLite
//! connection and runs migrations on first use.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};

use crate::domain::{DomainError, DomainResult};

/// Connection shared by every repository call
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Where the records live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreTargetError {
    #[error("unsupported store scheme '{0}', expected sqlite://")]
    UnsupportedScheme(String),
    #[error("store path is empty")]
    EmptyPath,
}

impl StoreTarget {
    /// Parse `sqlite://<path>`, `sqlite::memory:`, `:memory:` or a bare path.
    pub fn parse(url: &str) -> Result<Self, StoreTargetError> {
        let url = url.trim();
        if url == ":memory:" || url == "sqlite::memory:" {
            return Ok(StoreTarget::Memory);
        }

        let path = match url.strip_prefix("sqlite://") {
            Some(rest) => rest,
            None => match url.split_once("://") {
                Some((scheme, _)) => {
                    return Err(StoreTargetError::UnsupportedScheme(scheme.to_string()))
                }
                None => url,
            },
        };

        match path {
            "" => Err(StoreTargetError::EmptyPath),
            ":memory:" => Ok(StoreTarget::Memory),
            _ => Ok(StoreTarget::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreTarget::Memory => write!(f, "sqlite::memory:"),
            StoreTarget::File(path) => write!(f, "sqlite://{}", path.display()),
        }
    }
}

struct StoreInner {
    target: Option<StoreTarget>,
    conn: OnceCell<SharedConnection>,
}

/// Process-scoped store handle
///
/// Cloning is cheap and every clone shares the same lazily opened connection.
/// The first caller of [`StoreHandle::connect`] opens it, concurrent callers
/// wait on that same attempt, and a failed attempt leaves the handle empty so
/// the next call retries.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<StoreInner>,
}

impl StoreHandle {
    pub fn new(target: Option<StoreTarget>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                target,
                conn: OnceCell::new(),
            }),
        }
    }

    /// Handle with no target; every `connect` reports unavailable
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn is_connected(&self) -> bool {
        self.inner.conn.initialized()
    }

    /// Get the shared connection, opening it if necessary.
    ///
    /// Returns `Ok(None)` when no store is configured.
    pub async fn connect(&self) -> DomainResult<Option<SharedConnection>> {
        let Some(target) = self.inner.target.as_ref() else {
            tracing::warn!("No store configured, skipping connection");
            return Ok(None);
        };

        let conn = self
            .inner
            .conn
            .get_or_try_init(|| async {
                tracing::info!(store = %target, "Opening store connection");
                match open_store(target) {
                    Ok(conn) => Ok(Arc::new(Mutex::new(conn))),
                    Err(e) => {
                        tracing::error!(store = %target, error = %e, "Failed to open store");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(Some(Arc::clone(conn)))
    }
}

/// Open a connection and bring the schema up to date
pub fn open_store(target: &StoreTarget) -> DomainResult<Connection> {
    let conn = match target {
        StoreTarget::Memory => Connection::open_in_memory(),
        StoreTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DomainError::StoreUnavailable(format!("Failed to create store directory: {}", e))
                })?;
            }
            Connection::open(path)
        }
    }
    .map_err(|e| DomainError::StoreUnavailable(format!("Failed to connect: {}", e)))?;

    run_migrations(&conn)?;
    Ok(conn)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL CHECK (length(title) BETWEEN 1 AND 60),
            completed INTEGER NOT NULL DEFAULT 0,
            priority INTEGER NOT NULL DEFAULT 3 CHECK (priority BETWEEN 1 AND 5),
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Notes and media arrived after the first schema revision
    if !column_exists(conn, "todos", "notes")? {
        conn.execute(
            "ALTER TABLE todos ADD COLUMN notes TEXT NOT NULL DEFAULT ''",
            [],
        )?;
    }

    if !column_exists(conn, "todos", "media")? {
        conn.execute(
            "ALTER TABLE todos ADD COLUMN media TEXT NOT NULL DEFAULT '[]'",
            [],
        )?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_display
            ON todos(priority DESC, sort_order ASC, created_at DESC)",
        [],
    )?;

    Ok(())
}
