//! Schema migrations for the local list store.
//!
//! # Invariants
//! - Versions are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - All pending migrations commit in one transaction or not at all.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, script)` pairs, oldest first.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, include_str!("0001_init.sql")),
    (2, include_str!("0002_family_scope.sql")),
];

/// Latest schema version this build knows.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Migrations a store at `current` still needs.
fn pending(current: u32) -> impl Iterator<Item = &'static (u32, &'static str)> {
    MIGRATIONS.iter().filter(move |(version, _)| *version > current)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file was written by a
///   newer build.
/// - [`DbError::Migration`] naming the script that failed; the store keeps
///   its previous version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let mut steps = pending(current).peekable();
    if steps.peek().is_none() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in steps {
        let script = format!("{sql}\nPRAGMA user_version = {version};");
        tx.execute_batch(&script)
            .map_err(|source| DbError::Migration {
                version: *version,
                source,
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current, latest
    );
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, pending};

    #[test]
    fn pending_skips_applied_versions() {
        let versions: Vec<u32> = pending(1).map(|(version, _)| *version).collect();
        assert_eq!(versions, [2]);
        assert_eq!(pending(latest_version()).count(), 0);
    }
}
