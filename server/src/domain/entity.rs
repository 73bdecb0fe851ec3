//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A field is missing or outside its allowed range
    #[error("Invalid input: {0}")]
    Validation(String),
    /// The identifier resolves to nothing
    #[error("Not found: {0}")]
    NotFound(String),
    /// No store is configured or the connection could not be established
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// Any other store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl DomainError {
    /// The message without the category prefix, suitable for clients
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg)
            | DomainError::NotFound(msg)
            | DomainError::StoreUnavailable(msg)
            | DomainError::Store(msg) => msg,
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(value.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(value: serde_json::Error) -> Self {
        Self::Store(value.to_string())
    }
}
