//! Categorized checklist core.
//!
//! # Responsibility
//! - Keep list state as an explicit value with pure transitions.
//! - Derive grouped, completion-sorted sections for rendering.
//! - Provide presentation helpers (confirm gate, draft buffers).
//!
//! # Invariants
//! - List operations are synchronous and never fail with an error.

pub mod confirm;
pub mod draft;
pub mod manager;
pub mod state;
pub mod view;
