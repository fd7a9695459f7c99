//! Core data layer for the Todoey to-do list.
//! Categories own items; every store call is one synchronous transaction.
//!
//! Access is single-threaded: repositories borrow a `rusqlite::Connection`,
//! which cannot be shared between threads. Callers that serve several
//! threads must funnel store access through one owner or a mutex.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::item::{Item, ItemId, ItemState, NewItem};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::{PersistenceError, RepoResult};
pub use search::fold::fold_for_match;
pub use service::category_store::CategoryStore;
pub use service::item_store::ItemStore;

/// Minimal health-check API for boundary smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
