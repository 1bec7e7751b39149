//! JSON document reads and writes.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{DatabaseResultExt, Result};

/// Key of the persisted [`PlanState`](crate::models::PlanState).
pub const PLAN_STATE_KEY: &str = "planState";
/// Key of the persisted [`HistoryState`](crate::history::HistoryState).
pub const PLAN_HISTORY_KEY: &str = "planHistory";
/// Key of the persisted [`CostCalculator`](crate::calculator::CostCalculator).
pub const CALCULATOR_KEY: &str = "calculator";

const SELECT_DOCUMENT_SQL: &str = "SELECT body FROM documents WHERE key = ?1";
const UPSERT_DOCUMENT_SQL: &str = "INSERT INTO documents (key, body, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at";
const DELETE_DOCUMENT_SQL: &str = "DELETE FROM documents WHERE key = ?1";

impl super::Database {
    /// Raw JSON body stored under `key`, if any.
    pub fn load_value(&self, key: &str) -> Result<Option<Value>> {
        let body: Option<String> = self
            .connection
            .query_row(SELECT_DOCUMENT_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to load document")?;

        body.map(|b| serde_json::from_str(&b))
            .transpose()
            .map_err(Into::into)
    }

    /// Document stored under `key`, deserialized.
    pub fn load_document<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.load_value(key)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Writes every `(key, document)` pair in a single transaction.
    pub fn save_documents(&mut self, documents: &[(&str, &dyn ErasedDocument)]) -> Result<()> {
        let now = Timestamp::now().to_string();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for (key, document) in documents {
            let body = document.to_json()?;
            tx.execute(UPSERT_DOCUMENT_SQL, params![key, body, &now])
                .db_context("Failed to save document")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Saved {} documents", documents.len());
        Ok(())
    }

    /// Writes a single document.
    pub fn save_document<T: Serialize>(&mut self, key: &str, document: &T) -> Result<()> {
        self.save_documents(&[(key, document as &dyn ErasedDocument)])
    }

    /// Removes the document under `key`. Returns whether one existed.
    pub fn delete_document(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_DOCUMENT_SQL, params![key])
            .db_context("Failed to delete document")?;
        Ok(removed > 0)
    }
}

/// Object-safe serialization so documents of different types can be saved
/// together.
pub trait ErasedDocument {
    fn to_json(&self) -> Result<String>;
}

impl<T: Serialize> ErasedDocument for T {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
