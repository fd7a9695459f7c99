//! Repository layer: SQL access for categories and items.
//!
//! # Responsibility
//! - Define the data access contracts used by the stores.
//! - Keep SQLite query details out of the store/service layer.
//!
//! # Invariants
//! - Every mutation runs inside exactly one immediate transaction.
//! - Repositories report semantic not-found errors in addition to DB errors.

use crate::db::DbError;
use crate::model::category::CategoryId;
use crate::model::item::ItemId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod item_repo;
mod readiness;
mod tx;

pub type RepoResult<T> = Result<T, PersistenceError>;

/// The single error type surfaced by repositories and stores.
#[derive(Debug)]
pub enum PersistenceError {
    /// The durable read or write could not complete.
    Db(DbError),
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Target item does not exist (in the given category, for scoped calls).
    ItemNotFound(ItemId),
    /// Connection was not bootstrapped to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from a bootstrapped connection.
    MissingRequiredTable(&'static str),
    /// A persisted row cannot be decoded.
    InvalidData(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "store requires table `{table}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl PersistenceError {
    /// Stable short code for logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_error",
            Self::CategoryNotFound(_) => "category_not_found",
            Self::ItemNotFound(_) => "item_not_found",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
