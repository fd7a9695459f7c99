use rusqlite::Connection;
use todoey_core::db::open_db_in_memory;
use todoey_core::{
    CategoryStore, ItemStore, PersistenceError, SqliteCategoryRepository, SqliteItemRepository,
};
use uuid::Uuid;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn category_store(conn: &Connection) -> CategoryStore<SqliteCategoryRepository<'_>> {
    CategoryStore::new(SqliteCategoryRepository::try_new(conn).unwrap())
}

fn item_store(conn: &Connection) -> ItemStore<SqliteItemRepository<'_>> {
    ItemStore::new(SqliteItemRepository::try_new(conn).unwrap())
}

#[test]
fn create_then_list_returns_matching_empty_category() {
    let conn = setup();
    let categories = category_store(&conn);
    let items = item_store(&conn);

    let created = categories.create("Work", "#FF0000").unwrap();
    let all = categories.list_all().unwrap();

    assert_eq!(all, vec![created.clone()]);
    assert_eq!(all[0].name, "Work");
    assert_eq!(all[0].color_code, "#FF0000");
    assert!(items.list_items(created.id).unwrap().is_empty());
}

#[test]
fn empty_name_and_color_are_accepted() {
    let conn = setup();
    let categories = category_store(&conn);

    let created = categories.create("", "").unwrap();
    let loaded = categories.get(created.id).unwrap().unwrap();
    assert_eq!(loaded.name, "");
    assert_eq!(loaded.color_code, "");
}

#[test]
fn list_all_keeps_insertion_order() {
    let conn = setup();
    let categories = category_store(&conn);

    let names = ["Zulu", "alpha", "Mike", "Bravo"];
    for name in names {
        categories.create(name, "").unwrap();
    }

    let listed: Vec<_> = categories
        .list_all()
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(listed, names);
}

#[test]
fn list_all_is_a_snapshot() {
    let conn = setup();
    let categories = category_store(&conn);

    categories.create("Home", "").unwrap();
    let snapshot = categories.list_all().unwrap();
    categories.create("Work", "").unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(categories.list_all().unwrap().len(), 2);
}

#[test]
fn rename_replaces_only_the_name() {
    let conn = setup();
    let categories = category_store(&conn);

    let created = categories.create("Shoping", "#123456").unwrap();
    let renamed = categories.rename(created.id, "Shopping").unwrap();

    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.name, "Shopping");
    assert_eq!(renamed.color_code, "#123456");
}

#[test]
fn delete_cascades_to_items() {
    let conn = setup();
    let categories = category_store(&conn);
    let items = item_store(&conn);

    let doomed = categories.create("Errands", "").unwrap();
    let kept = categories.create("Work", "").unwrap();
    let doomed_item = items.add_item(doomed.id, "Post letter", "").unwrap();
    let kept_item = items.add_item(kept.id, "Write report", "").unwrap();

    categories.delete(doomed.id).unwrap();

    assert_eq!(categories.list_all().unwrap(), vec![kept.clone()]);
    assert!(items.get(doomed_item.id).unwrap().is_none());
    assert_eq!(items.list_items(kept.id).unwrap(), vec![kept_item]);

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 1);
}

#[test]
fn delete_missing_category_reports_not_found() {
    let conn = setup();
    let categories = category_store(&conn);
    let missing = Uuid::new_v4();

    let err = categories.delete(missing).unwrap_err();
    assert!(matches!(err, PersistenceError::CategoryNotFound(id) if id == missing));
    assert_eq!(err.code(), "category_not_found");
}

#[test]
fn deleting_twice_fails_the_second_time() {
    let conn = setup();
    let categories = category_store(&conn);

    let created = categories.create("Once", "").unwrap();
    categories.delete(created.id).unwrap();
    assert!(categories.delete(created.id).is_err());
}

#[test]
fn failed_create_leaves_no_partial_state() {
    let conn = setup();
    let categories = category_store(&conn);
    conn.execute_batch(
        "CREATE TRIGGER reject_categories BEFORE INSERT ON categories
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let err = categories.create("Never", "").unwrap_err();
    assert!(matches!(err, PersistenceError::Db(_)));
    assert!(categories.list_all().unwrap().is_empty());
}

#[test]
fn failed_delete_keeps_category_and_items() {
    let conn = setup();
    let categories = category_store(&conn);
    let items = item_store(&conn);

    let work = categories.create("Work", "#FF0000").unwrap();
    let first = items.add_item(work.id, "Buy milk", "").unwrap();
    let second = items.add_item(work.id, "Call mom", "").unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_category_delete AFTER DELETE ON categories
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let err = categories.delete(work.id).unwrap_err();
    assert!(matches!(err, PersistenceError::Db(_)));
    assert_eq!(categories.list_all().unwrap(), vec![work.clone()]);
    assert_eq!(items.list_items(work.id).unwrap(), vec![first.clone(), second.clone()]);
    assert_eq!(items.parent_category(first.id).unwrap(), Some(work));
}
