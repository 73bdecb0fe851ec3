//! Todo Entity
//!
//! A short text task with a priority tier, notes, attached media URLs and a
//! manual position inside its tier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// Maximum title length, in characters
pub const MAX_TITLE_LEN: usize = 60;
/// Lowest priority tier
pub const MIN_PRIORITY: i64 = 1;
/// Highest priority tier
pub const MAX_PRIORITY: i64 = 5;
/// Priority assigned when a create request omits it
pub const DEFAULT_PRIORITY: i64 = 3;

/// Current time at the store's millisecond precision
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Opaque store-assigned identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = DomainError;

    /// An id that cannot be parsed can never resolve to a record.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::NotFound("Todo not found".to_string()))
    }
}

/// A todo record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    /// 1..=5, 5 is highest
    pub priority: i64,
    pub notes: String,
    pub media: Vec<String>,
    /// Secondary sort key inside a priority tier
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Build a fresh record with defaults for everything but title, priority and order.
    pub fn new(title: String, priority: i64, order: i64) -> Self {
        let now = now();
        Self {
            id: TodoId::generate(),
            title,
            completed: false,
            priority,
            notes: String::new(),
            media: Vec::new(),
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch in place. `order` and timestamps are not patchable.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(media) = patch.media {
            self.media = media;
        }
    }
}

impl Entity for Todo {
    type Id = TodoId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Input for the create operation
#[derive(Debug, Clone, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

impl NewTodo {
    /// Validate and normalise, returning the trimmed title and priority.
    pub fn validate(self) -> DomainResult<(String, i64)> {
        let title = validate_title(&self.title)?;
        let priority = validate_priority(self.priority)?;
        Ok((title, priority))
    }
}

/// Partial update. Unknown fields, including `order`, `id` and timestamps, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i64>,
    pub notes: Option<String>,
    pub media: Option<Vec<String>>,
}

impl TodoPatch {
    pub fn validate(mut self) -> DomainResult<Self> {
        if let Some(title) = self.title.take() {
            self.title = Some(validate_title(&title)?);
        }
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Trim a title and check it is non-empty and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> DomainResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "Title cannot be more than {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_priority(priority: i64) -> DomainResult<i64> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(priority)
    } else {
        Err(DomainError::Validation(format!(
            "Priority must be between {} and {}",
            MIN_PRIORITY, MAX_PRIORITY
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let todo = Todo::new("Write report".to_string(), 4, 2);
        assert_eq!(todo.title, "Write report");
        assert!(!todo.completed);
        assert_eq!(todo.priority, 4);
        assert_eq!(todo.order, 2);
        assert!(todo.notes.is_empty());
        assert!(todo.media.is_empty());
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(validate_title("  buy milk ").unwrap(), "buy milk");
        assert!(matches!(validate_title(""), Err(DomainError::Validation(_))));
        assert!(matches!(validate_title("   \t"), Err(DomainError::Validation(_))));
        assert!(validate_title(&"x".repeat(60)).is_ok());
        assert!(validate_title(&"x".repeat(61)).is_err());
        // Counted in characters, not bytes
        assert!(validate_title(&"é".repeat(60)).is_ok());
    }

    #[test]
    fn test_priority_validation() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(5).is_ok());
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(6).is_err());
    }

    #[test]
    fn test_new_todo_defaults_priority() {
        let input: NewTodo = serde_json::from_str(r#"{"title":"a"}"#).unwrap();
        assert_eq!(input.priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn test_patch_ignores_order() {
        let patch: TodoPatch =
            serde_json::from_str(r#"{"order": 42, "completed": true}"#).unwrap();
        let mut todo = Todo::new("a".to_string(), 3, 7);
        todo.apply(patch);
        assert_eq!(todo.order, 7);
        assert!(todo.completed);
    }

    #[test]
    fn test_empty_patch() {
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_invalid_id_is_not_found() {
        assert!(matches!(
            "not-a-uuid".parse::<TodoId>(),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        let todo = Todo::new("a".to_string(), 3, 0);
        let value = serde_json::to_value(&todo).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("order").is_some());
        assert!(value["id"].is_string());
    }
}
