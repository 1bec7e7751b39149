//! SQLite-backed document store.
//!
//! The engine persists a handful of JSON documents (the plan, its undo
//! history and the calculator mode) in a single key/value table. Writes that
//! belong together go through [`Database::save_documents`], which commits
//! them in one transaction.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod documents;
pub mod migrations;

pub use documents::{CALCULATOR_KEY, PLAN_HISTORY_KEY, PLAN_STATE_KEY};

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) a database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database. Nothing survives the process.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
