//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is insertion order (`seq ASC`).
//! - Deleting a category removes its items in the same transaction, through
//!   the `ON DELETE CASCADE` foreign key.

use super::readiness::ensure_connection_ready;
use super::tx::write_unit;
use super::{PersistenceError, RepoResult};
use crate::model::category::{Category, CategoryId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const CATEGORY_SELECT_SQL: &str = "SELECT uuid, name, color_code FROM categories";

/// Repository interface for category persistence.
pub trait CategoryRepository {
    /// Persists a new category and returns the stored record.
    fn create_category(&self, category: &Category) -> RepoResult<Category>;
    /// Loads one category by id.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Lists every category in insertion order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Replaces the display name of one category.
    fn rename_category(&self, id: CategoryId, name: &str) -> RepoResult<Category>;
    /// Deletes one category together with all of its items.
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Creates a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["categories", "items"])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<Category> {
        write_unit(self.conn, "category_create", |tx| {
            tx.execute(
                "INSERT INTO categories (uuid, name, color_code) VALUES (?1, ?2, ?3);",
                params![
                    category.id.to_string(),
                    category.name.as_str(),
                    category.color_code.as_str(),
                ],
            )?;
            load_required_category(tx, category.id)
        })
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        load_category(self.conn, id)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn rename_category(&self, id: CategoryId, name: &str) -> RepoResult<Category> {
        write_unit(self.conn, "category_rename", |tx| {
            let changed = tx.execute(
                "UPDATE categories SET name = ?2 WHERE uuid = ?1;",
                params![id.to_string(), name],
            )?;
            if changed == 0 {
                return Err(PersistenceError::CategoryNotFound(id));
            }
            load_required_category(tx, id)
        })
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        write_unit(self.conn, "category_delete", |tx| {
            let changed = tx.execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(PersistenceError::CategoryNotFound(id));
            }
            Ok(())
        })
    }
}

pub(crate) fn load_category(conn: &Connection, id: CategoryId) -> RepoResult<Option<Category>> {
    conn.query_row(
        &format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"),
        [id.to_string()],
        |row| Ok(parse_category_row(row)),
    )
    .optional()?
    .transpose()
}

fn load_required_category(conn: &Connection, id: CategoryId) -> RepoResult<Category> {
    load_category(conn, id)?.ok_or(PersistenceError::CategoryNotFound(id))
}

pub(crate) fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        PersistenceError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in categories.uuid"
        ))
    })?;

    Ok(Category {
        id,
        name: row.get("name")?,
        color_code: row.get("color_code")?,
    })
}
