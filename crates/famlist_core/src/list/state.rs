//! Explicit list state and its pure transitions.
//!
//! # Responsibility
//! - Hold items, categories and edit mode as one value.
//! - Apply one [`ListOp`] at a time, producing the next state.
//!
//! # Invariants
//! - Invalid input (blank label, blank category, unknown id, unknown
//!   category) is a no-op.
//! - Category labels are trimmed the same way for items, registration and
//!   deletion.
//! - Category deletion removes the label and its items in one replacement.
//! - At most one item is in edit mode.
//! - Edit mode never points at an item that no longer exists.

use crate::model::category::{normalize_category, CategoryRegistry};
use crate::model::item::{normalize_label, Item, ItemId};
use serde::{Deserialize, Serialize};

/// Edit mode of one list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing {
        item_id: ItemId,
        /// Working text; not applied to the item until commit.
        buffer: String,
    },
}

impl EditMode {
    /// Returns the item currently being edited.
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Editing { item_id, .. } => Some(*item_id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

/// One user intent against a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp {
    AddItem {
        id: ItemId,
        category: String,
        label: String,
    },
    ToggleItem(ItemId),
    StartEdit(ItemId),
    SetEditBuffer(String),
    CommitEdit(String),
    CommitEditBuffer,
    CancelEdit,
    ClearCompleted,
    AddCategory(String),
    DeleteCategory(String),
}

impl ListOp {
    /// Short stable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "add_item",
            Self::ToggleItem(_) => "toggle_item",
            Self::StartEdit(_) => "start_edit",
            Self::SetEditBuffer(_) => "set_edit_buffer",
            Self::CommitEdit(_) => "commit_edit",
            Self::CommitEditBuffer => "commit_edit_buffer",
            Self::CancelEdit => "cancel_edit",
            Self::ClearCompleted => "clear_completed",
            Self::AddCategory(_) => "add_category",
            Self::DeleteCategory(_) => "delete_category",
        }
    }
}

/// Whether a transition changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Noop,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Persistable part of a list: categories and items, without edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub categories: Vec<String>,
    pub items: Vec<Item>,
}

/// Complete state of one categorized checklist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    items: Vec<Item>,
    categories: CategoryRegistry,
    edit: EditMode,
}

impl ListState {
    /// Fresh state: no items, registry seeded with the default category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores state from a snapshot. Edit mode starts idle.
    ///
    /// Snapshots loaded from the store are already validated. Hand-built ones
    /// are normalized: items repeating an earlier id are dropped, and blank or
    /// duplicate category labels are skipped.
    pub fn from_snapshot(snapshot: ListSnapshot) -> Self {
        let mut items: Vec<Item> = Vec::with_capacity(snapshot.items.len());
        for item in snapshot.items {
            if !items.iter().any(|existing| existing.id == item.id) {
                items.push(item);
            }
        }
        Self {
            items,
            categories: CategoryRegistry::from_labels(&snapshot.categories),
            edit: EditMode::Idle,
        }
    }

    pub fn to_snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            categories: self.categories.as_slice().to_vec(),
            items: self.items.clone(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn edit_mode(&self) -> &EditMode {
        &self.edit
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Applies one operation and returns the next state.
    pub fn apply(self, op: ListOp) -> (Self, Outcome) {
        match op {
            ListOp::AddItem {
                id,
                category,
                label,
            } => self.add_item(id, category, &label),
            ListOp::ToggleItem(id) => self.toggle_item(id),
            ListOp::StartEdit(id) => self.start_edit(id),
            ListOp::SetEditBuffer(text) => self.set_edit_buffer(text),
            ListOp::CommitEdit(text) => self.commit_edit(&text),
            ListOp::CommitEditBuffer => match self.edit.clone() {
                EditMode::Editing { buffer, .. } => self.commit_edit(&buffer),
                EditMode::Idle => (self, Outcome::Noop),
            },
            ListOp::CancelEdit => self.cancel_edit(),
            ListOp::ClearCompleted => self.retain_items(|item| !item.completed),
            ListOp::AddCategory(label) => self.add_category(&label),
            ListOp::DeleteCategory(label) => self.delete_category(&label),
        }
    }

    fn add_item(mut self, id: ItemId, category: String, label: &str) -> (Self, Outcome) {
        if self.item(id).is_some() {
            return (self, Outcome::Noop);
        }
        let Some(category) = normalize_category(&category) else {
            return (self, Outcome::Noop);
        };
        match Item::new(id, category, label) {
            Some(item) => {
                self.items.push(item);
                (self, Outcome::Applied)
            }
            None => (self, Outcome::Noop),
        }
    }

    fn toggle_item(mut self, id: ItemId) -> (Self, Outcome) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                (self, Outcome::Applied)
            }
            None => (self, Outcome::Noop),
        }
    }

    // Switching targets drops the previous buffer without committing it.
    fn start_edit(mut self, id: ItemId) -> (Self, Outcome) {
        let Some(buffer) = self.item(id).map(|item| item.label.clone()) else {
            return (self, Outcome::Noop);
        };
        self.edit = EditMode::Editing {
            item_id: id,
            buffer,
        };
        (self, Outcome::Applied)
    }

    fn set_edit_buffer(mut self, text: String) -> (Self, Outcome) {
        match &mut self.edit {
            EditMode::Editing { buffer, .. } => {
                *buffer = text;
                (self, Outcome::Applied)
            }
            EditMode::Idle => (self, Outcome::Noop),
        }
    }

    fn commit_edit(mut self, text: &str) -> (Self, Outcome) {
        let Some(target) = self.edit.item_id() else {
            return (self, Outcome::Noop);
        };
        let Some(label) = normalize_label(text) else {
            return (self, Outcome::Noop);
        };
        if let Some(item) = self.items.iter_mut().find(|item| item.id == target) {
            item.label = label;
        }
        self.edit = EditMode::Idle;
        (self, Outcome::Applied)
    }

    fn cancel_edit(mut self) -> (Self, Outcome) {
        if !self.edit.is_editing() {
            return (self, Outcome::Noop);
        }
        self.edit = EditMode::Idle;
        (self, Outcome::Applied)
    }

    fn add_category(mut self, label: &str) -> (Self, Outcome) {
        if self.categories.insert(label) {
            (self, Outcome::Applied)
        } else {
            (self, Outcome::Noop)
        }
    }

    fn delete_category(self, label: &str) -> (Self, Outcome) {
        let Some(label) = normalize_category(label) else {
            return (self, Outcome::Noop);
        };
        let has_items = self.items.iter().any(|item| item.category == label);
        if !self.categories.contains(label) && !has_items {
            return (self, Outcome::Noop);
        }

        let Self {
            items,
            mut categories,
            edit,
        } = self;
        categories.remove(label);
        let items: Vec<Item> = items
            .into_iter()
            .filter(|item| item.category != label)
            .collect();
        let next = Self {
            edit: edit_surviving(edit, &items),
            items,
            categories,
        };
        (next, Outcome::Applied)
    }

    fn retain_items(self, keep: impl Fn(&Item) -> bool) -> (Self, Outcome) {
        let Self {
            items,
            categories,
            edit,
        } = self;
        let before = items.len();
        let items: Vec<Item> = items.into_iter().filter(|item| keep(item)).collect();
        let outcome = if items.len() == before {
            Outcome::Noop
        } else {
            Outcome::Applied
        };
        let next = Self {
            edit: edit_surviving(edit, &items),
            items,
            categories,
        };
        (next, outcome)
    }
}

fn edit_surviving(edit: EditMode, items: &[Item]) -> EditMode {
    match edit.item_id() {
        Some(target) if !items.iter().any(|item| item.id == target) => EditMode::Idle,
        _ => edit,
    }
}
