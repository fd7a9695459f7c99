//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist items inside their owning category.
//! - Serve the two item orderings: by title, and newest first for search.
//!
//! # Invariants
//! - Title listing is `title ASC` under SQLite's binary collation, then
//!   insertion order (`seq ASC`) on ties.
//! - Search results are `created_at DESC`, then `seq DESC` on ties.
//! - `title_folded` is always `fold_for_match(title)`; it is written on
//!   insert and never exposed to callers.

use super::category_repo::{load_category, parse_category_row};
use super::readiness::ensure_connection_ready;
use super::tx::{write_unit, NOW_EPOCH_MS_SQL};
use super::{PersistenceError, RepoResult};
use crate::model::category::{Category, CategoryId};
use crate::model::item::{Item, ItemId, NewItem};
use crate::search::fold::{fold_for_match, search_key};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    category_uuid,
    title,
    color_code,
    done,
    created_at
FROM items";

/// Repository interface for item persistence.
pub trait ItemRepository {
    /// Appends a new pending item to `category_id`.
    fn add_item(&self, category_id: CategoryId, item: &NewItem) -> RepoResult<Item>;
    /// Loads one item by id.
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Lists items of one category by title.
    fn list_items(&self, category_id: CategoryId) -> RepoResult<Vec<Item>>;
    /// Lists matching items of one category, newest first.
    fn search_items(&self, category_id: CategoryId, query: &str) -> RepoResult<Vec<Item>>;
    /// Flips `done` and returns the updated item.
    fn toggle_done(&self, id: ItemId) -> RepoResult<Item>;
    /// Removes one item from its category.
    fn delete_item(&self, category_id: CategoryId, id: ItemId) -> RepoResult<()>;
    /// Resolves the category that contains `id`.
    fn parent_category(&self, id: ItemId) -> RepoResult<Option<Category>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["categories", "items"])?;
        Ok(Self { conn })
    }

    fn ensure_category_exists(&self, category_id: CategoryId) -> RepoResult<()> {
        match load_category(self.conn, category_id)? {
            Some(_) => Ok(()),
            None => Err(PersistenceError::CategoryNotFound(category_id)),
        }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn add_item(&self, category_id: CategoryId, item: &NewItem) -> RepoResult<Item> {
        write_unit(self.conn, "item_add", |tx| {
            if load_category(tx, category_id)?.is_none() {
                return Err(PersistenceError::CategoryNotFound(category_id));
            }

            tx.execute(
                &format!(
                    "INSERT INTO items (
                        uuid,
                        category_uuid,
                        title,
                        title_folded,
                        color_code,
                        done,
                        created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, 0, {NOW_EPOCH_MS_SQL});"
                ),
                params![
                    item.id.to_string(),
                    category_id.to_string(),
                    item.title.as_str(),
                    fold_for_match(&item.title),
                    item.color_code.as_str(),
                ],
            )?;
            load_item(tx, item.id)?.ok_or(PersistenceError::ItemNotFound(item.id))
        })
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        load_item(self.conn, id)
    }

    fn list_items(&self, category_id: CategoryId) -> RepoResult<Vec<Item>> {
        self.ensure_category_exists(category_id)?;
        query_items(
            self.conn,
            &format!("{ITEM_SELECT_SQL} WHERE category_uuid = ?1 ORDER BY title ASC, seq ASC;"),
            params![category_id.to_string()],
        )
    }

    fn search_items(&self, category_id: CategoryId, query: &str) -> RepoResult<Vec<Item>> {
        self.ensure_category_exists(category_id)?;
        let Some(key) = search_key(query) else {
            return query_items(
                self.conn,
                &format!(
                    "{ITEM_SELECT_SQL} WHERE category_uuid = ?1 ORDER BY created_at DESC, seq DESC;"
                ),
                params![category_id.to_string()],
            );
        };

        // `instr(x, '')` is 1 for every row; an empty key matches nothing.
        if key.is_empty() {
            return Ok(Vec::new());
        }

        query_items(
            self.conn,
            &format!(
                "{ITEM_SELECT_SQL}
                 WHERE category_uuid = ?1
                   AND instr(title_folded, ?2) > 0
                 ORDER BY created_at DESC, seq DESC;"
            ),
            params![category_id.to_string(), key],
        )
    }

    fn toggle_done(&self, id: ItemId) -> RepoResult<Item> {
        write_unit(self.conn, "item_toggle_done", |tx| {
            let changed = tx.execute(
                "UPDATE items SET done = 1 - done WHERE uuid = ?1;",
                [id.to_string()],
            )?;
            if changed == 0 {
                return Err(PersistenceError::ItemNotFound(id));
            }
            load_item(tx, id)?.ok_or(PersistenceError::ItemNotFound(id))
        })
    }

    fn delete_item(&self, category_id: CategoryId, id: ItemId) -> RepoResult<()> {
        write_unit(self.conn, "item_delete", |tx| {
            let changed = tx.execute(
                "DELETE FROM items WHERE uuid = ?1 AND category_uuid = ?2;",
                params![id.to_string(), category_id.to_string()],
            )?;
            if changed == 0 {
                return Err(PersistenceError::ItemNotFound(id));
            }
            Ok(())
        })
    }

    fn parent_category(&self, id: ItemId) -> RepoResult<Option<Category>> {
        self.conn
            .query_row(
                "SELECT c.uuid AS uuid, c.name AS name, c.color_code AS color_code
                 FROM items i
                 INNER JOIN categories c ON c.uuid = i.category_uuid
                 WHERE i.uuid = ?1;",
                [id.to_string()],
                |row| Ok(parse_category_row(row)),
            )
            .optional()?
            .transpose()
    }
}

fn load_item(conn: &Connection, id: ItemId) -> RepoResult<Option<Item>> {
    conn.query_row(
        &format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"),
        [id.to_string()],
        |row| Ok(parse_item_row(row)),
    )
    .optional()?
    .transpose()
}

fn query_items(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> RepoResult<Vec<Item>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }
    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id = parse_uuid(row.get("uuid")?, "items.uuid")?;
    let category_id = parse_uuid(row.get("category_uuid")?, "items.category_uuid")?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(PersistenceError::InvalidData(format!(
                "invalid done value `{other}` in items.done"
            )));
        }
    };

    Ok(Item {
        id,
        category_id,
        title: row.get("title")?,
        color_code: row.get("color_code")?,
        done,
        created_at: row.get("created_at")?,
    })
}

fn parse_uuid(value: String, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(&value).map_err(|_| {
        PersistenceError::InvalidData(format!("invalid uuid value `{value}` in {column}"))
    })
}
