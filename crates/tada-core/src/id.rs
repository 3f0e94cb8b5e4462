//! Todo item identifiers
//!
//! Ids are epoch milliseconds captured at creation time, so they sort in
//! creation order and survive round-trips through the persisted slot as
//! plain integers. `IdSource` guarantees uniqueness even when two items
//! are created within the same millisecond.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a todo item
///
/// Opaque to callers; stable for the lifetime of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Construct an id from raw epoch milliseconds
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Get the underlying millisecond value
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing a `TodoId` from a string fails
#[derive(Error, Debug)]
#[error("Invalid todo id: '{0}'")]
pub struct ParseTodoIdError(String);

impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ParseTodoIdError(s.to_string()))
    }
}

/// Allocates fresh ids from the system clock
///
/// When the clock hasn't advanced past the previously issued id (two adds
/// in the same millisecond, or a clock step backwards), the allocator bumps
/// one past it so every issued id is unique and strictly increasing.
#[derive(Debug, Default)]
pub struct IdSource {
    last: i64,
}

impl IdSource {
    /// Create a new source with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id already in use (e.g. loaded from storage)
    pub fn observe(&mut self, id: TodoId) {
        self.last = self.last.max(id.0);
    }

    /// Issue the next id
    pub fn next(&mut self) -> TodoId {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        TodoId(self.last)
    }
}
