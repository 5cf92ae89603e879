//! Ordered category registry.
//!
//! # Invariants
//! - Labels are unique (exact, case-sensitive match).
//! - Insertion order is display order.
//! - A fresh registry holds exactly [`DEFAULT_CATEGORY`].
//! - Every label entering the registry or an item goes through
//!   [`normalize_category`].

use serde::{Deserialize, Serialize};

/// Category every new list starts with.
pub const DEFAULT_CATEGORY: &str = "General";

/// Trims a category label, returning `None` when nothing is left.
pub fn normalize_category(label: &str) -> Option<&str> {
    let trimmed = label.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Ordered set of category labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    labels: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            labels: vec![DEFAULT_CATEGORY.to_string()],
        }
    }
}

impl CategoryRegistry {
    /// Creates a registry seeded with [`DEFAULT_CATEGORY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from stored labels, dropping blanks and duplicates.
    ///
    /// An empty input yields an empty registry; a list whose categories were
    /// all deleted stays that way.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self { labels: Vec::new() };
        for label in labels {
            registry.insert(label.as_ref());
        }
        registry
    }

    /// Appends a trimmed label.
    ///
    /// Returns `false` (and leaves the registry untouched) for blank or
    /// already registered labels.
    pub fn insert(&mut self, label: &str) -> bool {
        match normalize_category(label) {
            Some(trimmed) if !self.contains(trimmed) => {
                self.labels.push(trimmed.to_string());
                true
            }
            _ => false,
        }
    }

    /// Removes `label`, returning whether it was present.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|existing| existing != label);
        self.labels.len() != before
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|existing| existing == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
