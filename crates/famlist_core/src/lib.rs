//! Core domain logic for famlist shared household lists.
//! This crate is the single source of truth for list invariants.

pub mod db;
pub mod list;
pub mod logging;
pub mod model;
pub mod repo;

pub use list::confirm::{
    clear_completed_with, delete_category_with, AlwaysConfirm, ConfirmGate, ConfirmPrompt,
    NeverConfirm,
};
pub use list::draft::DraftInputs;
pub use list::manager::ListManager;
pub use list::state::{EditMode, ListOp, ListSnapshot, ListState, Outcome};
pub use list::view::{derive_sections, Section};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{CategoryRegistry, DEFAULT_CATEGORY};
pub use model::item::{Item, ItemId, ItemValidationError};
pub use model::list_kind::ListKind;
pub use repo::list_repo::{
    ListRepository, RepoError, RepoResult, SqliteListRepository, StoredList,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
