//! Per-category pending input text.
//!
//! Presentation state: the list core only ever sees a finished
//! `(category, label)` pair.

use crate::list::manager::ListManager;
use crate::model::item::{normalize_label, ItemId};
use std::collections::HashMap;

/// Text typed into each category's "new item" field.
#[derive(Debug, Clone, Default)]
pub struct DraftInputs {
    buffers: HashMap<String, String>,
}

impl DraftInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: &str, text: impl Into<String>) {
        self.buffers.insert(category.to_string(), text.into());
    }

    /// Current text for `category`, empty when nothing was typed.
    pub fn get(&self, category: &str) -> &str {
        self.buffers.get(category).map_or("", String::as_str)
    }

    /// Takes a submittable `(category, label)` pair.
    ///
    /// Blank input stays in place and yields `None`.
    pub fn take(&mut self, category: &str) -> Option<(String, String)> {
        let label = normalize_label(self.get(category))?;
        self.buffers.remove(category);
        Some((category.to_string(), label))
    }

    /// Submits the category's draft into `manager`.
    pub fn submit_into(&mut self, manager: &mut ListManager, category: &str) -> Option<ItemId> {
        let (category, label) = self.take(category)?;
        manager.add_item(&category, &label)
    }
}
