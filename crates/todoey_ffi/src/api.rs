//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the category/item store operations to Dart via FRB.
//! - Turn every failure into an envelope (`ok=false` + message).
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - All store access is serialized through one process-wide lock, so only
//!   one call touches SQLite at a time.
//! - Ids cross the boundary as hyphenated UUID strings.

use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use todoey_core::db::open_db;
use todoey_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Category, CategoryStore, Item, ItemStore, SqliteCategoryRepository, SqliteItemRepository,
    StoreConfig,
};
use uuid::Uuid;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Category as rendered by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub color_code: String,
}

/// Item as rendered by the item screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub color_code: String,
    pub done: bool,
    /// `pending` or `completed`.
    pub state: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Envelope for calls returning one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResponse {
    pub ok: bool,
    pub message: String,
    pub category: Option<CategoryView>,
}

/// Envelope for calls returning the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub ok: bool,
    pub message: String,
    pub categories: Vec<CategoryView>,
}

/// Envelope for calls returning one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResponse {
    pub ok: bool,
    pub message: String,
    pub item: Option<ItemView>,
}

/// Envelope for calls returning an item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<ItemView>,
}

/// Envelope for calls with no payload (deletes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Creates a category. `color_code` is stored verbatim.
#[flutter_rust_bridge::frb(sync)]
pub fn category_create(name: String, color_code: String) -> CategoryResponse {
    let result = with_connection(|conn| {
        category_store(conn)?
            .create(name, color_code)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(category) => CategoryResponse {
            ok: true,
            message: "Category created.".to_string(),
            category: Some(to_category_view(category)),
        },
        Err(err) => CategoryResponse {
            ok: false,
            message: format!("category_create failed: {err}"),
            category: None,
        },
    }
}

/// Lists categories in creation order.
#[flutter_rust_bridge::frb(sync)]
pub fn category_list() -> CategoryListResponse {
    let result =
        with_connection(|conn| category_store(conn)?.list_all().map_err(|err| err.to_string()));
    match result {
        Ok(categories) => CategoryListResponse {
            ok: true,
            message: format!("{} categories.", categories.len()),
            categories: categories.into_iter().map(to_category_view).collect(),
        },
        Err(err) => CategoryListResponse {
            ok: false,
            message: format!("category_list failed: {err}"),
            categories: Vec::new(),
        },
    }
}

/// Deletes a category and all of its items.
///
/// Failures are logged and reported; the caller keeps its current view.
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(category_id: String) -> ActionResponse {
    let result = with_connection(|conn| {
        let id = parse_id(&category_id, "category_id")?;
        category_store(conn)?.delete(id).map_err(|err| err.to_string())
    });
    action_response("category_delete", "Category deleted.", result)
}

/// Adds a pending item to a category.
#[flutter_rust_bridge::frb(sync)]
pub fn item_add(category_id: String, title: String, color_code: String) -> ItemResponse {
    let result = with_connection(|conn| {
        let id = parse_id(&category_id, "category_id")?;
        item_store(conn)?
            .add_item(id, title, color_code)
            .map_err(|err| err.to_string())
    });
    item_response("item_add", "Item added.", result)
}

/// Lists a category's items sorted by title.
#[flutter_rust_bridge::frb(sync)]
pub fn item_list(category_id: String) -> ItemListResponse {
    let result = with_connection(|conn| {
        let id = parse_id(&category_id, "category_id")?;
        item_store(conn)?.list_items(id).map_err(|err| err.to_string())
    });
    item_list_response("item_list", result)
}

/// Searches a category's items, newest first. Empty text lists everything.
#[flutter_rust_bridge::frb(sync)]
pub fn item_search(category_id: String, text: String) -> ItemListResponse {
    let result = with_connection(|conn| {
        let id = parse_id(&category_id, "category_id")?;
        item_store(conn)?
            .search_items(id, text.as_str())
            .map_err(|err| err.to_string())
    });
    item_list_response("item_search", result)
}

/// Flips an item's done flag and returns the updated item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_toggle_done(item_id: String) -> ItemResponse {
    let result = with_connection(|conn| {
        let id = parse_id(&item_id, "item_id")?;
        item_store(conn)?.toggle_done(id).map_err(|err| err.to_string())
    });
    item_response("item_toggle_done", "Item updated.", result)
}

/// Deletes one item from its category.
///
/// Failures are logged and reported; the caller keeps its current view.
#[flutter_rust_bridge::frb(sync)]
pub fn item_delete(category_id: String, item_id: String) -> ActionResponse {
    let result = with_connection(|conn| {
        let category = parse_id(&category_id, "category_id")?;
        let item = parse_id(&item_id, "item_id")?;
        item_store(conn)?
            .delete(category, item)
            .map_err(|err| err.to_string())
    });
    action_response("item_delete", "Item deleted.", result)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| match StoreConfig::from_env() {
            Ok(config) => config.db_path,
            Err(err) => {
                warn!("event=config_load module=ffi status=error error={err}");
                StoreConfig::from_lookup(|_| None)
                    .map(|config| config.db_path)
                    .unwrap_or_else(|_| std::env::temp_dir().join("todoey.sqlite3"))
            }
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    // The guard protects no data, so a poisoned lock is still usable.
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(resolve_db_path()).map_err(|err| format!("store open failed: {err}"))?;
    f(&conn)
}

fn category_store(
    conn: &Connection,
) -> Result<CategoryStore<SqliteCategoryRepository<'_>>, String> {
    SqliteCategoryRepository::try_new(conn)
        .map(CategoryStore::new)
        .map_err(|err| format!("store init failed: {err}"))
}

fn item_store(conn: &Connection) -> Result<ItemStore<SqliteItemRepository<'_>>, String> {
    SqliteItemRepository::try_new(conn)
        .map(ItemStore::new)
        .map_err(|err| format!("store init failed: {err}"))
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid {field}: `{raw}`"))
}

fn action_response(op: &str, success: &str, result: Result<(), String>) -> ActionResponse {
    match result {
        Ok(()) => ActionResponse {
            ok: true,
            message: success.to_string(),
        },
        Err(err) => {
            warn!("event={op} module=ffi status=error");
            ActionResponse {
                ok: false,
                message: format!("{op} failed: {err}"),
            }
        }
    }
}

fn item_response(op: &str, success: &str, result: Result<Item, String>) -> ItemResponse {
    match result {
        Ok(item) => ItemResponse {
            ok: true,
            message: success.to_string(),
            item: Some(to_item_view(item)),
        },
        Err(err) => ItemResponse {
            ok: false,
            message: format!("{op} failed: {err}"),
            item: None,
        },
    }
}

fn item_list_response(op: &str, result: Result<Vec<Item>, String>) -> ItemListResponse {
    match result {
        Ok(items) => ItemListResponse {
            ok: true,
            message: if items.is_empty() {
                "No items.".to_string()
            } else {
                format!("{} item(s).", items.len())
            },
            items: items.into_iter().map(to_item_view).collect(),
        },
        Err(err) => ItemListResponse {
            ok: false,
            message: format!("{op} failed: {err}"),
            items: Vec::new(),
        },
    }
}

fn to_category_view(category: Category) -> CategoryView {
    CategoryView {
        id: category.id.to_string(),
        name: category.name,
        color_code: category.color_code,
    }
}

fn to_item_view(item: Item) -> ItemView {
    let state = item.state().as_str().to_string();
    ItemView {
        id: item.id.to_string(),
        category_id: item.category_id.to_string(),
        title: item.title,
        color_code: item.color_code,
        done: item.done,
        state,
        created_at: item.created_at,
    }
}
