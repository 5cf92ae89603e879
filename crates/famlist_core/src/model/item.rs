//! Checklist item model.
//!
//! # Responsibility
//! - Define the leaf record shared by grocery and todo lists.
//! - Normalize labels the same way on create and on edit.
//!
//! # Invariants
//! - `id` is assigned once and never reused for another item.
//! - `label` is trimmed and never blank.
//! - `category` is captured at creation time and not re-validated later.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one checklist item.
pub type ItemId = Uuid;

/// Validation failures for persisted or externally supplied items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    NilId,
    BlankLabel,
    BlankCategory,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be nil"),
            Self::BlankLabel => write!(f, "item label must not be blank"),
            Self::BlankCategory => write!(f, "item category must not be blank"),
        }
    }
}

impl Error for ItemValidationError {}

/// One entry of a categorized checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display text, already trimmed.
    pub label: String,
    pub completed: bool,
    /// Category label this item was filed under.
    pub category: String,
}

impl Item {
    /// Builds an item from raw user text.
    ///
    /// Returns `None` when `label` is blank after trimming.
    pub fn new(id: ItemId, category: impl Into<String>, label: &str) -> Option<Self> {
        let label = normalize_label(label)?;
        Some(Self {
            id,
            label,
            completed: false,
            category: category.into(),
        })
    }

    /// Checks the record invariants.
    ///
    /// Used on read paths where the data did not pass through [`Item::new`].
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        if self.label.trim().is_empty() {
            return Err(ItemValidationError::BlankLabel);
        }
        if self.category.trim().is_empty() {
            return Err(ItemValidationError::BlankCategory);
        }
        Ok(())
    }
}

/// Trims user text, returning `None` when nothing is left.
pub fn normalize_label(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
