//! Widget settings repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist the ordered widget visibility configuration.
//!
//! # Invariants
//! - `position` order is the render order; rows are rewritten densely from 0.
//! - An empty table reads back as `WidgetConfig::default()`.
//! - Only resolvable configurations (known, unique keys) are stored.

use crate::db::DbError;
use crate::model::widget::{WidgetConfig, WidgetConfigError, WidgetKey};
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings persistence error.
#[derive(Debug)]
pub enum SettingsError {
    /// Configuration rejected before writing.
    Config(WidgetConfigError),
    Db(DbError),
    /// Stored rows do not describe a valid configuration.
    InvalidData(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted widget settings: {message}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<WidgetConfigError> for SettingsError {
    fn from(value: WidgetConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for SettingsError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SettingsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the widget layout.
pub trait WidgetSettingsRepository {
    /// Reads the stored configuration in render order.
    fn load_config(&self) -> SettingsResult<WidgetConfig>;
    /// Replaces the stored configuration in one transaction.
    fn save_config(&mut self, config: &WidgetConfig) -> SettingsResult<()>;
    /// Shows or hides one widget and returns the updated configuration.
    ///
    /// A widget missing from the stored layout is appended at the end.
    fn set_visibility(&mut self, key: WidgetKey, visible: bool) -> SettingsResult<WidgetConfig>;
}

/// SQLite-backed widget settings repository.
pub struct SqliteWidgetSettingsRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteWidgetSettingsRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `InvalidData` when the `widget_settings` table is missing, which
    ///   means the connection did not come from `db::open_db*`.
    pub fn try_new(conn: &'conn mut Connection) -> SettingsResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'widget_settings'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(SettingsError::InvalidData(
                "widget_settings table is missing; open the database with db::open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl WidgetSettingsRepository for SqliteWidgetSettingsRepository<'_> {
    fn load_config(&self) -> SettingsResult<WidgetConfig> {
        let mut stmt = self.conn.prepare(
            "SELECT widget_key, visible
             FROM widget_settings
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut config = WidgetConfig::empty();

        while let Some(row) = rows.next()? {
            let key: String = row.get("widget_key")?;
            if WidgetKey::parse(&key).is_none() {
                return Err(SettingsError::InvalidData(format!(
                    "unknown widget key `{key}` in widget_settings.widget_key"
                )));
            }
            let visible = match row.get::<_, i64>("visible")? {
                0 => false,
                1 => true,
                other => {
                    return Err(SettingsError::InvalidData(format!(
                        "invalid visible value `{other}` in widget_settings.visible"
                    )));
                }
            };
            config.push(key, visible);
        }

        if config.is_empty() {
            return Ok(WidgetConfig::default());
        }
        Ok(config)
    }

    fn save_config(&mut self, config: &WidgetConfig) -> SettingsResult<()> {
        let entries = config.resolve()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM widget_settings;", [])?;
        for (position, (key, visible)) in entries.iter().enumerate() {
            tx.execute(
                "INSERT INTO widget_settings (position, widget_key, visible)
                 VALUES (?1, ?2, ?3);",
                params![position as i64, key.as_str(), bool_to_int(*visible)],
            )?;
        }
        tx.commit()?;

        info!(
            "event=widget_settings_save module=repo status=ok entries={} visible={}",
            entries.len(),
            entries.iter().filter(|(_, visible)| *visible).count()
        );
        Ok(())
    }

    fn set_visibility(&mut self, key: WidgetKey, visible: bool) -> SettingsResult<WidgetConfig> {
        let mut config = self.load_config()?;
        config.set_visibility(key, visible);
        self.save_config(&config)?;
        Ok(config)
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
