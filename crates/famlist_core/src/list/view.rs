//! Grouped read view for rendering.
//!
//! # Invariants
//! - Sections follow registry order, one per registered category.
//! - Inside a section, incomplete items precede completed ones and insertion
//!   order is kept within each group (stable partition).
//! - Items filed under an unregistered category are not shown.

use crate::list::state::ListState;
use crate::model::item::Item;
use serde::{Deserialize, Serialize};

/// One rendered category block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<Item>,
}

/// Projects `state` into display sections.
pub fn derive_sections(state: &ListState) -> Vec<Section> {
    state
        .categories()
        .iter()
        .map(|title| Section {
            title: title.to_string(),
            items: partition_by_completion(
                state.items().iter().filter(|item| item.category == title),
            ),
        })
        .collect()
}

fn partition_by_completion<'a>(items: impl Iterator<Item = &'a Item> + Clone) -> Vec<Item> {
    items
        .clone()
        .filter(|item| !item.completed)
        .chain(items.filter(|item| item.completed))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::derive_sections;
    use crate::list::state::{ListOp, ListState};
    use uuid::Uuid;

    #[test]
    fn empty_state_yields_default_section() {
        let sections = derive_sections(&ListState::new());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "General");
        assert!(sections[0].items.is_empty());
    }

    #[test]
    fn unregistered_category_items_are_hidden() {
        let (state, _) = ListState::new().apply(ListOp::AddItem {
            id: Uuid::new_v4(),
            category: "Frozen".to_string(),
            label: "Peas".to_string(),
        });
        let sections = derive_sections(&state);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].items.is_empty());
        assert_eq!(state.items().len(), 1);
    }
}
