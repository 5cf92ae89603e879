use famlist_core::{derive_sections, ListManager, ListOp, ListState, Section};
use uuid::Uuid;

fn labels(section: &Section) -> Vec<&str> {
    section.items.iter().map(|item| item.label.as_str()).collect()
}

#[test]
fn incomplete_items_precede_completed_with_stable_order() {
    let mut manager = ListManager::new();
    let a = manager.add_item("General", "A").unwrap();
    manager.add_item("General", "B").unwrap();
    let c = manager.add_item("General", "C").unwrap();
    manager.add_item("General", "D").unwrap();
    let e = manager.add_item("General", "E").unwrap();

    manager.toggle_item(a);
    manager.toggle_item(c);
    manager.toggle_item(e);

    let view = manager.derived_view();
    assert_eq!(labels(&view[0]), ["B", "D", "A", "C", "E"]);
}

#[test]
fn sections_follow_registry_order_not_item_order() {
    let mut manager = ListManager::new();
    manager.add_category("Produce");
    manager.add_category("Dairy");
    manager.add_item("Dairy", "Cheese").unwrap();
    manager.add_item("Produce", "Kale").unwrap();
    manager.add_item("General", "Foil").unwrap();

    let titles: Vec<String> = manager
        .derived_view()
        .into_iter()
        .map(|section| section.title)
        .collect();
    assert_eq!(titles, ["General", "Produce", "Dairy"]);
}

#[test]
fn view_is_pure_projection() {
    let mut manager = ListManager::new();
    let id = manager.add_item("General", "Milk").unwrap();
    manager.toggle_item(id);
    manager.add_item("General", "Bread").unwrap();

    let before = manager.state().clone();
    let first = manager.derived_view();
    let second = manager.derived_view();

    assert_eq!(first, second);
    assert_eq!(manager.state(), &before);
    // Underlying insertion order is untouched by the sorted view.
    assert_eq!(manager.items()[0].label, "Milk");
}

#[test]
fn derive_sections_works_on_bare_state() {
    let (state, _) = ListState::new().apply(ListOp::AddCategory("Produce".to_string()));
    let (state, _) = state.apply(ListOp::AddItem {
        id: Uuid::new_v4(),
        category: "Produce".to_string(),
        label: "Apples".to_string(),
    });

    let sections = derive_sections(&state);
    assert_eq!(sections.len(), 2);
    assert_eq!(labels(&sections[1]), ["Apples"]);
}

#[test]
fn section_serializes_as_title_and_items() {
    let mut manager = ListManager::new();
    manager.add_item("General", "Milk").unwrap();

    let json = serde_json::to_value(manager.derived_view()).unwrap();
    assert_eq!(json[0]["title"], "General");
    assert_eq!(json[0]["items"][0]["label"], "Milk");
    assert_eq!(json[0]["items"][0]["completed"], false);
    assert_eq!(json[0]["items"][0]["category"], "General");
}
