//! Item record and its completion state.
//!
//! # Invariants
//! - `created_at` is assigned by the store on insert and never changes.
//! - `done` is the only mutable state; see [`ItemState`].

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an item.
pub type ItemId = Uuid;

/// Two-state completion lifecycle. Fully reversible, no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Pending,
    Completed,
}

impl ItemState {
    /// The state reached by one toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    /// Wire name, same as the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// One to-do entry inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Owning category. Store-side index for the item -> category lookup.
    pub category_id: CategoryId,
    pub title: String,
    pub color_code: String,
    pub done: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Item {
    /// Returns the completion state derived from `done`.
    pub fn state(&self) -> ItemState {
        if self.done {
            ItemState::Completed
        } else {
            ItemState::Pending
        }
    }
}

/// Unsaved item fields supplied by the caller.
///
/// `done` and `created_at` are not part of the draft: new items always
/// start pending and the store stamps the creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: ItemId,
    pub title: String,
    pub color_code: String,
}

impl NewItem {
    pub fn new(title: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            color_code: color_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ItemState;

    #[test]
    fn toggling_twice_returns_to_start() {
        assert_eq!(ItemState::Pending.toggled(), ItemState::Completed);
        assert_eq!(ItemState::Pending.toggled().toggled(), ItemState::Pending);
    }

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(ItemState::Pending.as_str(), "pending");
        assert_eq!(ItemState::Completed.as_str(), "completed");
    }
}
