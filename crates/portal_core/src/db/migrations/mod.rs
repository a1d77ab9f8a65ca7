//! Settings schema migrations.
//!
//! # Responsibility
//! - Bring the settings database up to the latest widget layout schema.
//! - Confirm `widget_settings` carries every layout column.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - A database whose `user_version` claims the latest schema but lacks a
//!   layout column is rejected, never patched.

use crate::db::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_widget_settings.sql"),
}];

/// Columns `widget_settings` must carry at the latest version.
const WIDGET_SETTINGS_COLUMNS: [&str; 4] = ["position", "widget_key", "visible", "updated_at"];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return verify_settings_schema(conn, current_version);
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=settings_migrate module=db status=ok from_version={current_version} to_version={latest}"
    );
    verify_settings_schema(conn, latest)
}

fn verify_settings_schema(conn: &Connection, user_version: u32) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('widget_settings');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(missing) = WIDGET_SETTINGS_COLUMNS
        .iter()
        .copied()
        .find(|expected| !columns.iter().any(|column| column == expected))
    {
        error!(
            "event=settings_schema module=db status=error user_version={user_version} missing_column={missing}"
        );
        return Err(DbError::SchemaMismatch {
            user_version,
            missing_column: missing.to_string(),
        });
    }

    debug!("event=settings_schema module=db status=ok user_version={user_version}");
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
