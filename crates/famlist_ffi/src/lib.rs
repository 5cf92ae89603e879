//! Flutter bridge for famlist core.
//!
//! # Responsibility
//! - Re-export the FRB-facing API module.

pub mod api;
