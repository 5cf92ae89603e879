//! Local SQLite store bootstrap.
//!
//! # Responsibility
//! - Resolve and open the list store file (or an in-memory store).
//! - Run schema migrations before any list data is touched.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A store file is only created inside an existing directory.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the list store.
#[derive(Debug)]
pub enum DbError {
    /// Store path was empty or only whitespace.
    BlankStorePath,
    /// Directory meant to hold the store file does not exist.
    StoreDirMissing(PathBuf),
    /// One migration script failed; nothing from the batch was kept.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Store was written by a newer famlist build.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Stable code for `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankStorePath => "db_blank_path",
            Self::StoreDirMissing(_) => "db_dir_missing",
            Self::Migration { .. } => "db_migration_failed",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
            Self::Sqlite(_) => "db_sqlite",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankStorePath => write!(f, "list store path must not be blank"),
            Self::StoreDirMissing(dir) => {
                write!(f, "list store directory `{}` does not exist", dir.display())
            }
            Self::Migration { version, source } => {
                write!(f, "list store migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "list store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
