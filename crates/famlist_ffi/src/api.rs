//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list operations to Dart via FRB as sync functions.
//! - Load the list snapshot, apply one operation, save it back.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Confirmation for destructive actions happens in the Flutter shell
//!   before `list_clear_completed` / `list_delete_category` are called.
//! - Every list response carries the freshly derived sections.

use famlist_core::db::open_db;
use famlist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ItemId, ListKind, ListManager, ListRepository, Section, SqliteListRepository, StoredList,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const LIST_DB_FILE_NAME: &str = "famlist.sqlite3";
const LIST_DB_PATH_ENV: &str = "FAMLIST_DB_PATH";
static LIST_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the list store location for this process.
///
/// Must run before the first list call; afterwards only the same path is
/// accepted. Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_list_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = LIST_DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "list store already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One checklist row for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    pub item_id: String,
    pub label: String,
    pub completed: bool,
}

/// One category block for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSectionView {
    pub title: String,
    pub items: Vec<ListItemView>,
}

/// Response envelope for every list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// Whether the call reached the list (a rejected no-op still counts).
    pub ok: bool,
    /// Whether list contents changed.
    pub changed: bool,
    /// Created item ID for `list_add_item`.
    pub item_id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// Derived sections after the call; empty on failure.
    pub sections: Vec<ListSectionView>,
}

impl ListResponse {
    fn from_manager(manager: &ListManager, changed: bool, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed,
            item_id: None,
            message: message.into(),
            sections: manager.derived_view().into_iter().map(to_section_view).collect(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            item_id: None,
            message: message.into(),
            sections: Vec::new(),
        }
    }
}

/// Creates the list when missing and returns its sections.
///
/// `kind` is `grocery` or `todo`; `family_id` is stored for shared lists.
#[flutter_rust_bridge::frb(sync)]
pub fn list_open(list_key: String, kind: String, family_id: Option<String>) -> ListResponse {
    let Some(kind) = ListKind::parse(&kind) else {
        return ListResponse::failure(format!("list_open failed: unknown list kind `{kind}`"));
    };
    let db_path = resolve_list_db_path();
    let result = open_db(&db_path)
        .map_err(|err| format!("list DB open failed: {err}"))
        .and_then(|conn| {
            let repo = SqliteListRepository::new(&conn);
            match repo.load_list(&list_key).map_err(|err| err.to_string())? {
                Some(stored) => Ok(ListManager::from_snapshot(stored.snapshot)),
                None => {
                    let manager = ListManager::new();
                    repo.save_list(&StoredList {
                        list_key: list_key.clone(),
                        kind,
                        family_id: family_id.clone(),
                        snapshot: manager.to_snapshot(),
                    })
                    .map_err(|err| err.to_string())?;
                    Ok(manager)
                }
            }
        });

    match result {
        Ok(manager) => ListResponse::from_manager(&manager, false, "List ready."),
        Err(err) => ListResponse::failure(format!("list_open failed: {err}")),
    }
}

/// Returns the derived sections of an existing list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_view(list_key: String) -> ListResponse {
    with_list("list_view", &list_key, |_| (false, None))
}

/// Adds one item; blank labels are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn list_add_item(list_key: String, category: String, label: String) -> ListResponse {
    with_list("list_add_item", &list_key, |manager| {
        let created = manager.add_item(&category, &label);
        (created.is_some(), created)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_toggle_item(list_key: String, item_id: String) -> ListResponse {
    let Some(id) = parse_item_id(&item_id) else {
        return ListResponse::failure(format!(
            "list_toggle_item failed: invalid item id `{item_id}`"
        ));
    };
    with_list("list_toggle_item", &list_key, |manager| {
        (manager.toggle_item(id), None)
    })
}

/// Renames one item through a start/commit edit cycle.
///
/// Blank labels leave the item unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn list_rename_item(list_key: String, item_id: String, label: String) -> ListResponse {
    let Some(id) = parse_item_id(&item_id) else {
        return ListResponse::failure(format!(
            "list_rename_item failed: invalid item id `{item_id}`"
        ));
    };
    with_list("list_rename_item", &list_key, |manager| {
        let changed = manager.start_edit(id) && manager.commit_edit(&label);
        (changed, None)
    })
}

/// Removes completed items. Caller confirms beforehand.
#[flutter_rust_bridge::frb(sync)]
pub fn list_clear_completed(list_key: String) -> ListResponse {
    with_list("list_clear_completed", &list_key, |manager| {
        (manager.clear_completed(), None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_add_category(list_key: String, label: String) -> ListResponse {
    with_list("list_add_category", &list_key, |manager| {
        (manager.add_category(&label), None)
    })
}

/// Deletes a category and its items. Caller confirms beforehand.
#[flutter_rust_bridge::frb(sync)]
pub fn list_delete_category(list_key: String, label: String) -> ListResponse {
    with_list("list_delete_category", &list_key, |manager| {
        (manager.delete_category(&label), None)
    })
}

/// Lists stored list keys, optionally restricted to one family.
#[flutter_rust_bridge::frb(sync)]
pub fn list_keys(family_id: Option<String>) -> Vec<String> {
    let db_path = resolve_list_db_path();
    let keys = open_db(&db_path)
        .map_err(|err| err.to_string())
        .and_then(|conn| {
            SqliteListRepository::new(&conn)
                .list_keys(family_id.as_deref())
                .map_err(|err| err.to_string())
        });
    match keys {
        Ok(keys) => keys,
        Err(err) => {
            warn!("event=list_keys module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

fn with_list(
    op: &'static str,
    list_key: &str,
    f: impl FnOnce(&mut ListManager) -> (bool, Option<ItemId>),
) -> ListResponse {
    let db_path = resolve_list_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return ListResponse::failure(format!("{op} failed: list DB open failed: {err}"));
        }
    };
    let repo = SqliteListRepository::new(&conn);
    let mut stored = match repo.load_list(list_key) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            return ListResponse::failure(format!("{op} failed: list not found: {list_key}"));
        }
        Err(err) => return ListResponse::failure(format!("{op} failed: {err}")),
    };

    let mut manager = ListManager::from_snapshot(stored.snapshot.clone());
    let (changed, created) = f(&mut manager);
    if changed {
        stored.snapshot = manager.to_snapshot();
        if let Err(err) = repo.save_list(&stored) {
            return ListResponse::failure(format!("{op} failed: {err}"));
        }
    }

    let message = if changed { "Updated." } else { "No change." };
    let mut response = ListResponse::from_manager(&manager, changed, message);
    response.item_id = created.map(|id| id.to_string());
    response
}

fn parse_item_id(value: &str) -> Option<ItemId> {
    uuid::Uuid::parse_str(value.trim()).ok()
}

fn resolve_list_db_path() -> PathBuf {
    LIST_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(LIST_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(LIST_DB_FILE_NAME)
        })
        .clone()
}

fn to_section_view(section: Section) -> ListSectionView {
    ListSectionView {
        title: section.title,
        items: section
            .items
            .into_iter()
            .map(|item| ListItemView {
                item_id: item.id.to_string(),
                label: item.label,
                completed: item.completed,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_list_db_path, core_version, init_logging, list_add_category, list_add_item,
        list_clear_completed, list_delete_category, list_keys, list_open, list_rename_item,
        list_toggle_item, list_view, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_key(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_log_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_list_db_path_rejects_blank() {
        assert!(!configure_list_db_path("  ".to_string()).is_empty());
    }

    #[test]
    fn list_open_rejects_unknown_kind() {
        let response = list_open(unique_key("kind"), "finances".to_string(), None);
        assert!(!response.ok);
    }

    #[test]
    fn mutations_on_missing_list_fail() {
        let response = list_add_item(unique_key("missing"), "General".into(), "Milk".into());
        assert!(!response.ok);
        assert!(response.message.contains("list not found"));
    }

    #[test]
    fn grocery_flow_persists_between_calls() {
        let key = unique_key("groceries");
        let opened = list_open(key.clone(), "grocery".to_string(), Some("fam-ffi".into()));
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(opened.sections.len(), 1);

        assert!(list_add_category(key.clone(), "Produce".into()).changed);
        let milk = list_add_item(key.clone(), "General".into(), "Milk".into());
        let milk_id = milk.item_id.expect("add should return item_id");
        list_add_item(key.clone(), "Produce".into(), "Apples".into());

        let blank = list_add_item(key.clone(), "General".into(), "   ".into());
        assert!(blank.ok);
        assert!(!blank.changed);

        let toggled = list_toggle_item(key.clone(), milk_id.clone());
        assert!(toggled.changed);

        let renamed = list_rename_item(key.clone(), milk_id.clone(), " Oat milk ".into());
        assert!(renamed.changed);

        let view = list_view(key.clone());
        assert_eq!(view.sections[0].items[0].label, "Oat milk");
        assert!(view.sections[0].items[0].completed);
        assert_eq!(view.sections[1].items[0].label, "Apples");

        assert!(list_clear_completed(key.clone()).changed);
        let deleted = list_delete_category(key.clone(), "Produce".into());
        assert!(deleted.changed);
        assert_eq!(deleted.sections.len(), 1);
        assert!(deleted.sections[0].items.is_empty());

        assert!(list_keys(Some("fam-ffi".into())).contains(&key));
    }

    #[test]
    fn toggle_rejects_malformed_id() {
        let key = unique_key("todo");
        list_open(key.clone(), "todo".to_string(), None);
        let response = list_toggle_item(key, "not-a-uuid".into());
        assert!(!response.ok);
    }
}
