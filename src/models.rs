//! Frontend Models
//!
//! Data structures matching the server's JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIORITY: i64 = 3;

/// Priority options, lowest first
pub const PRIORITY_LABELS: &[(i64, &str)] = &[
    (1, "Lowest"),
    (2, "Low"),
    (3, "Medium"),
    (4, "High"),
    (5, "Highest"),
];

pub fn priority_label(priority: i64) -> &'static str {
    PRIORITY_LABELS
        .iter()
        .find(|(value, _)| *value == priority)
        .map(|(_, label)| *label)
        .unwrap_or("Unknown")
}

/// Todo data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTodo {
    pub title: String,
    pub priority: i64,
}

/// Partial update; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<String>>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn priority(priority: i64) -> Self {
        Self {
            priority: Some(priority),
            ..Default::default()
        }
    }

    pub fn text(title: String, notes: String) -> Self {
        Self {
            title: Some(title),
            notes: Some(notes),
            ..Default::default()
        }
    }

    pub fn media(media: Vec<String>) -> Self {
        Self {
            media: Some(media),
            ..Default::default()
        }
    }
}

/// One entry the server could not resequence
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReorderFailure {
    pub index: usize,
    #[serde(default)]
    pub id: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderResponse {
    pub updated: usize,
    #[serde(default)]
    pub failed: Vec<ReorderFailure>,
}
