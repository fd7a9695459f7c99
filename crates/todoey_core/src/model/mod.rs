//! Domain records for the to-do store.
//!
//! # Responsibility
//! - Define the category and item shapes shared by store, FFI and CLI.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - An item belongs to exactly one category; the link is the item's
//!   `category_id`, never an object reference.

pub mod category;
pub mod item;
