//! Stateful list manager used by presentation layers.
//!
//! # Responsibility
//! - Own one [`ListState`] and replace it on every operation.
//! - Generate item ids so callers never pick them.
//! - Emit metadata-only diagnostics (ids and counts, never labels).
//!
//! # Invariants
//! - Every mutation goes through [`ListState::apply`].
//! - No operation returns an error; rejected input is logged as `noop`.

use crate::list::state::{EditMode, ListOp, ListSnapshot, ListState, Outcome};
use crate::list::view::{derive_sections, Section};
use crate::model::category::CategoryRegistry;
use crate::model::item::{Item, ItemId};
use log::debug;
use uuid::Uuid;

/// Owner of one categorized checklist.
#[derive(Debug, Clone, Default)]
pub struct ListManager {
    state: ListState,
}

impl ListManager {
    /// Creates an empty list with the default category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a manager from persisted categories and items.
    pub fn from_snapshot(snapshot: ListSnapshot) -> Self {
        Self {
            state: ListState::from_snapshot(snapshot),
        }
    }

    pub fn to_snapshot(&self) -> ListSnapshot {
        self.state.to_snapshot()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Adds an item under `category`.
    ///
    /// Returns the new id, or `None` when `label` is blank.
    pub fn add_item(&mut self, category: &str, label: &str) -> Option<ItemId> {
        let id = Uuid::new_v4();
        let outcome = self.apply(ListOp::AddItem {
            id,
            category: category.to_string(),
            label: label.to_string(),
        });
        outcome.is_applied().then_some(id)
    }

    pub fn toggle_item(&mut self, id: ItemId) -> bool {
        self.apply(ListOp::ToggleItem(id)).is_applied()
    }

    /// Enters edit mode for `id`, dropping any other in-progress edit.
    pub fn start_edit(&mut self, id: ItemId) -> bool {
        self.apply(ListOp::StartEdit(id)).is_applied()
    }

    pub fn set_edit_buffer(&mut self, text: &str) -> bool {
        self.apply(ListOp::SetEditBuffer(text.to_string()))
            .is_applied()
    }

    /// Replaces the edited item's label and leaves edit mode.
    ///
    /// Blank text keeps edit mode active.
    pub fn commit_edit(&mut self, new_label: &str) -> bool {
        self.apply(ListOp::CommitEdit(new_label.to_string()))
            .is_applied()
    }

    /// Commits whatever the working buffer holds (submit/blur path).
    pub fn commit_edit_buffer(&mut self) -> bool {
        self.apply(ListOp::CommitEditBuffer).is_applied()
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.apply(ListOp::CancelEdit).is_applied()
    }

    /// Removes every completed item.
    ///
    /// Callers are expected to confirm first; see [`crate::list::confirm`].
    pub fn clear_completed(&mut self) -> bool {
        self.apply(ListOp::ClearCompleted).is_applied()
    }

    pub fn add_category(&mut self, label: &str) -> bool {
        self.apply(ListOp::AddCategory(label.to_string()))
            .is_applied()
    }

    /// Removes a category together with all of its items.
    pub fn delete_category(&mut self, label: &str) -> bool {
        self.apply(ListOp::DeleteCategory(label.to_string()))
            .is_applied()
    }

    /// Grouped, completion-sorted sections in registry order.
    pub fn derived_view(&self) -> Vec<Section> {
        derive_sections(&self.state)
    }

    pub fn items(&self) -> &[Item] {
        self.state.items()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.state.item(id)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        self.state.categories()
    }

    pub fn edit_mode(&self) -> &EditMode {
        self.state.edit_mode()
    }

    pub fn len(&self) -> usize {
        self.state.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.items().is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.state
            .items()
            .iter()
            .filter(|item| item.completed)
            .count()
    }

    fn apply(&mut self, op: ListOp) -> Outcome {
        let name = op.name();
        let (next, outcome) = std::mem::take(&mut self.state).apply(op);
        self.state = next;

        let status = match outcome {
            Outcome::Applied => "ok",
            Outcome::Noop => "noop",
        };
        debug!(
            "event=list_{} module=list status={} items={} categories={} editing={}",
            name,
            status,
            self.state.items().len(),
            self.state.categories().len(),
            self.state.edit_mode().is_editing()
        );
        outcome
    }
}
