//! List snapshot repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist the categories and items of one list under a list key.
//! - Read snapshots back in their original order.
//!
//! # Invariants
//! - `save_list` replaces the whole list inside one transaction.
//! - Category labels are stored trimmed, non-blank and unique; both save and
//!   load enforce this.
//! - Read paths reject corrupt rows (bad uuid, duplicate item id, blank or
//!   padded category) with `InvalidData` instead of masking them.
//! - Edit mode is session state and is never stored.

use crate::db::DbError;
use crate::list::state::ListSnapshot;
use crate::model::category::normalize_category;
use crate::model::item::{Item, ItemValidationError};
use crate::model::list_kind::ListKind;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const MAX_LIST_KEY_CHARS: usize = 128;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for list persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(String),
    InvalidData(String),
    InvalidListKey(String),
    /// Snapshot handed to `save_list` carries an unusable category label.
    InvalidCategory(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(key) => write!(f, "list not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted list data: {message}"),
            Self::InvalidListKey(key) => write!(f, "invalid list key: `{key}`"),
            Self::InvalidCategory(message) => write!(f, "invalid category: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One persisted list with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredList {
    pub list_key: String,
    pub kind: ListKind,
    /// Owning family, when the list is shared.
    pub family_id: Option<String>,
    pub snapshot: ListSnapshot,
}

/// Repository interface for list snapshots.
pub trait ListRepository {
    fn save_list(&self, list: &StoredList) -> RepoResult<()>;
    fn load_list(&self, list_key: &str) -> RepoResult<Option<StoredList>>;
    fn delete_list(&self, list_key: &str) -> RepoResult<()>;
    /// Keys sorted ascending, optionally restricted to one family.
    fn list_keys(&self, family_id: Option<&str>) -> RepoResult<Vec<String>>;
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn save_list(&self, list: &StoredList) -> RepoResult<()> {
        let list_key = normalize_list_key(&list.list_key)?;
        check_categories(&list.snapshot.categories).map_err(RepoError::InvalidCategory)?;
        for item in &list.snapshot.items {
            item.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO lists (list_key, kind, family_id)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(list_key) DO UPDATE SET
                kind = excluded.kind,
                family_id = excluded.family_id,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![list_key, list.kind.as_str(), list.family_id.as_deref()],
        )?;
        tx.execute(
            "DELETE FROM list_categories WHERE list_key = ?1;",
            [list_key],
        )?;
        tx.execute("DELETE FROM list_items WHERE list_key = ?1;", [list_key])?;

        {
            let mut insert_category = tx.prepare(
                "INSERT INTO list_categories (list_key, position, label) VALUES (?1, ?2, ?3);",
            )?;
            for (position, label) in list.snapshot.categories.iter().enumerate() {
                insert_category.execute(params![list_key, position as i64, label])?;
            }

            let mut insert_item = tx.prepare(
                "INSERT INTO list_items (list_key, position, item_uuid, label, completed, category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (position, item) in list.snapshot.items.iter().enumerate() {
                insert_item.execute(params![
                    list_key,
                    position as i64,
                    item.id.to_string(),
                    item.label.as_str(),
                    bool_to_int(item.completed),
                    item.category.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=list_save module=repo status=ok kind={} categories={} items={}",
            list.kind.as_str(),
            list.snapshot.categories.len(),
            list.snapshot.items.len()
        );
        Ok(())
    }

    fn load_list(&self, list_key: &str) -> RepoResult<Option<StoredList>> {
        let list_key = normalize_list_key(list_key)?;
        let header = self
            .conn
            .query_row(
                "SELECT kind, family_id FROM lists WHERE list_key = ?1;",
                [list_key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .optional()?;
        let Some((kind_text, family_id)) = header else {
            return Ok(None);
        };
        let kind = ListKind::parse(&kind_text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid list kind `{kind_text}` in lists.kind"))
        })?;

        let mut stmt = self.conn.prepare(
            "SELECT label FROM list_categories WHERE list_key = ?1 ORDER BY position ASC;",
        )?;
        let categories = stmt
            .query_map([list_key], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        check_categories(&categories)
            .map_err(|message| RepoError::InvalidData(format!("{message} in list_categories")))?;

        let mut stmt = self.conn.prepare(
            "SELECT item_uuid, label, completed, category
             FROM list_items
             WHERE list_key = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([list_key])?;
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        while let Some(row) = rows.next()? {
            let item = parse_item_row(row)?;
            if !seen.insert(item.id) {
                return Err(RepoError::InvalidData(format!(
                    "duplicate item id `{}` in list_items.item_uuid",
                    item.id
                )));
            }
            items.push(item);
        }

        Ok(Some(StoredList {
            list_key: list_key.to_string(),
            kind,
            family_id,
            snapshot: ListSnapshot { categories, items },
        }))
    }

    fn delete_list(&self, list_key: &str) -> RepoResult<()> {
        let list_key = normalize_list_key(list_key)?;
        let changed = self
            .conn
            .execute("DELETE FROM lists WHERE list_key = ?1;", [list_key])?;
        if changed == 0 {
            return Err(RepoError::NotFound(list_key.to_string()));
        }
        Ok(())
    }

    fn list_keys(&self, family_id: Option<&str>) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT list_key FROM lists
             WHERE (?1 IS NULL OR family_id = ?1)
             ORDER BY list_key ASC;",
        )?;
        let keys = stmt
            .query_map([family_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("item_uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in list_items.item_uuid"
        ))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in list_items.completed"
            )));
        }
    };

    let item = Item {
        id,
        label: row.get("label")?,
        completed,
        category: row.get("category")?,
    };
    item.validate()
        .map_err(|err| RepoError::InvalidData(format!("{err} (item {id})")))?;
    Ok(item)
}

// Labels must already be in the form `CategoryRegistry::insert` produces.
fn check_categories(labels: &[String]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for label in labels {
        if normalize_category(label) != Some(label.as_str()) {
            return Err(format!("blank or untrimmed label `{label}`"));
        }
        if !seen.insert(label.as_str()) {
            return Err(format!("duplicate label `{label}`"));
        }
    }
    Ok(())
}

fn normalize_list_key(value: &str) -> RepoResult<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_LIST_KEY_CHARS {
        return Err(RepoError::InvalidListKey(value.to_string()));
    }
    Ok(trimmed)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
