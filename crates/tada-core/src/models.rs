//! Data models for tada
//!
//! Defines the core data structures: `Todo` and the derived `Stats`.
//! The serialized field names (`id, text, completed, createdAt`) are the
//! slot format written to disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::TodoId;

/// A single todo item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// User-supplied text, stored raw (escaping happens at render time)
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
    /// When this item was created
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new, not-yet-completed item
    ///
    /// Callers pass already-trimmed, non-empty text; input validation is
    /// the store's job.
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Flip the completed flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Derived counts over a todo list
///
/// Never stored; always computed from the current list, so the counts
/// cannot drift from the underlying data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of items in the list
    pub total: usize,
    /// Items not yet completed
    pub active: usize,
    /// Items marked completed
    pub completed: usize,
}

impl Stats {
    /// Compute stats for a list of todos
    pub fn of(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total,
            active: total - completed,
            completed,
        }
    }
}
