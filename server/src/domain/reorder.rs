//! Reorder Batch Types
//!
//! A reorder request is a sequence of record references; each referenced
//! record takes its zero-based position in the sequence as its new `order`.

use serde::Serialize;
use serde_json::Value;

use super::todo::TodoId;

/// One entry of a reorder sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoRef {
    Id(TodoId),
    /// The entry could not be read as a record reference
    Invalid { raw: Option<String>, reason: String },
}

impl TodoRef {
    /// Accepts a full record object (`{"id": ...}`) or a bare id string.
    pub fn from_value(value: &Value) -> Self {
        let raw = match value {
            Value::String(s) => s.as_str(),
            Value::Object(map) => match map.get("id").and_then(Value::as_str) {
                Some(id) => id,
                None => {
                    return TodoRef::Invalid {
                        raw: None,
                        reason: "Missing todo id".to_string(),
                    }
                }
            },
            _ => {
                return TodoRef::Invalid {
                    raw: None,
                    reason: "Expected a todo object".to_string(),
                }
            }
        };
        match raw.parse::<TodoId>() {
            Ok(id) => TodoRef::Id(id),
            Err(_) => TodoRef::Invalid {
                raw: Some(raw.to_string()),
                reason: "Invalid todo id".to_string(),
            },
        }
    }
}

/// A reference that could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderFailure {
    /// Position in the request sequence
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub error: String,
}

/// Aggregated outcome of a reorder batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    pub updated: usize,
    pub failed: Vec<ReorderFailure>,
}

impl ReorderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
