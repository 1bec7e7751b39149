//! Database schema initialization and migrations.

use log::debug;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

/// Bumped whenever the layout of stored documents changes.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Records the schema version on first open and upgrades older stores.
    fn apply_migrations(&self) -> Result<()> {
        let stored: Option<String> = self
            .connection
            .query_row(
                "SELECT value FROM schema_meta WHERE key = 'version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to read schema version")?;

        let version = stored.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);
        if version < SCHEMA_VERSION {
            debug!("Migrating document store from version {version} to {SCHEMA_VERSION}");
            self.connection
                .execute(
                    "INSERT OR REPLACE INTO schema_meta (key, value) VALUES ('version', ?1)",
                    params![SCHEMA_VERSION.to_string()],
                )
                .db_context("Failed to record schema version")?;
        }

        Ok(())
    }

    /// Schema version recorded in the store.
    pub fn schema_version(&self) -> Result<i64> {
        let value: String = self
            .connection
            .query_row(
                "SELECT value FROM schema_meta WHERE key = 'version'",
                [],
                |row| row.get(0),
            )
            .db_context("Failed to read schema version")?;
        Ok(value.parse().unwrap_or(0))
    }
}
