//! Title matching for item search.
//!
//! # Responsibility
//! - Define the case- and diacritic-insensitive comparison key for titles.
//!
//! # See also
//! - `repo::item_repo` stores the folded key next to each title.

pub mod fold;
