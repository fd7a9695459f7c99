use todoey_core::{Category, Item, ItemState};
use uuid::Uuid;

#[test]
fn category_defaults_are_empty_strings() {
    let category = Category::default();
    assert!(!category.id.is_nil());
    assert_eq!(category.name, "");
    assert_eq!(category.color_code, "");
}

#[test]
fn new_categories_get_distinct_ids() {
    assert_ne!(Category::new("a", "").id, Category::new("a", "").id);
}

#[test]
fn item_serializes_with_snake_case_fields() {
    let item = Item {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        category_id: Uuid::parse_str("66666666-7777-4888-8999-000000000000").unwrap(),
        title: "Buy milk".to_string(),
        color_code: "#FF0000".to_string(),
        done: true,
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["category_id"], "66666666-7777-4888-8999-000000000000");
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["color_code"], "#FF0000");
    assert_eq!(json["done"], true);
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
    assert_eq!(decoded.state(), ItemState::Completed);
}

#[test]
fn item_state_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(ItemState::Completed).unwrap(),
        "completed"
    );
}
