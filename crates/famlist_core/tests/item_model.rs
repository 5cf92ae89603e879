use famlist_core::{Item, ItemValidationError, ListKind, ListManager, ListSnapshot};
use uuid::Uuid;

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut item = Item::new(id, "Produce", " Apples ").unwrap();
    item.completed = true;

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["label"], "Apples");
    assert_eq!(json["completed"], true);
    assert_eq!(json["category"], "Produce");

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn validate_flags_blank_label_from_external_data() {
    let item: Item = serde_json::from_value(serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "label": "   ",
        "completed": false,
        "category": "General"
    }))
    .unwrap();
    assert_eq!(item.validate(), Err(ItemValidationError::BlankLabel));
}

#[test]
fn snapshot_json_restores_manager() {
    let mut manager = ListManager::new();
    manager.add_category("Dairy");
    manager.add_item("Dairy", "Butter").unwrap();

    let json = serde_json::to_string(&manager.to_snapshot()).unwrap();
    let snapshot: ListSnapshot = serde_json::from_str(&json).unwrap();
    let restored = ListManager::from_snapshot(snapshot);

    assert_eq!(restored.categories(), manager.categories());
    assert_eq!(restored.items(), manager.items());
}

#[test]
fn snapshot_with_no_categories_stays_empty() {
    let restored = ListManager::from_snapshot(ListSnapshot::default());
    assert!(restored.categories().is_empty());
    assert!(restored.derived_view().is_empty());
}

#[test]
fn list_kind_serializes_snake_case() {
    assert_eq!(serde_json::to_value(ListKind::Todo).unwrap(), "todo");
    assert_eq!(ListKind::default(), ListKind::Grocery);
}
