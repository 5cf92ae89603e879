//! Repository layer for optional list durability.
//!
//! # Responsibility
//! - Define the snapshot persistence contract.
//! - Keep SQL inside the core persistence boundary.
//!
//! # Invariants
//! - Writes validate items before touching SQL.
//! - Reads report `InvalidData` for corrupt rows.

pub mod list_repo;
