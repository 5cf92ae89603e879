//! Checklist domain model.
//!
//! # Responsibility
//! - Define the item record and the category registry owned by list state.
//! - Keep label normalization in one place.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Category labels are unique within one registry.

pub mod category;
pub mod item;
pub mod list_kind;
