//! Category record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a category.
pub type CategoryId = Uuid;

/// A named list that owns its items.
///
/// Items are not embedded here; they are read through the item store so a
/// category listing never drags every item along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name. May be empty.
    pub name: String,
    /// Display color chosen by the caller, stored verbatim.
    pub color_code: String,
}

impl Category {
    /// Creates an unsaved category with a fresh id.
    pub fn new(name: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, color_code)
    }

    /// Creates an unsaved category with a caller-provided id.
    pub fn with_id(
        id: CategoryId,
        name: impl Into<String>,
        color_code: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color_code: color_code.into(),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new("", "")
    }
}
