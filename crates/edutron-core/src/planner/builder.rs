//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::Planner;
use crate::{
    calculator::CostCalculator,
    constants::DEFAULT_MAX_HISTORY_SIZE,
    db::{documents::ErasedDocument, Database, CALCULATOR_KEY, PLAN_HISTORY_KEY, PLAN_STATE_KEY},
    error::{EdutronError, Result},
    history::{HistoryState, WorkingState},
    models::{create_initial_plan_state, PlanState},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
    max_history_size: usize,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            in_memory: false,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/edutron/edutron.db` or
    /// `~/.local/share/edutron/edutron.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Keeps everything in memory. Nothing survives the planner.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Bounds the undo stack. Older entries are evicted first.
    pub fn with_max_history_size(mut self, max_history_size: usize) -> Self {
        self.max_history_size = max_history_size;
        self
    }

    /// Opens the store and restores the last session.
    ///
    /// Missing documents fall back to a fresh plan, an empty history and
    /// credits mode. A stored history that no longer parses is discarded
    /// with a warning rather than failing the build.
    ///
    /// # Errors
    ///
    /// Returns `EdutronError::FileSystem` if the database directory cannot
    /// be created, `EdutronError::Database` if the store cannot be opened,
    /// or `EdutronError::Serialization` if the stored plan is corrupt.
    pub fn build(self) -> Result<Planner> {
        let mut db = if self.in_memory {
            Database::open_in_memory()?
        } else {
            let db_path = match self.database_path {
                Some(path) => path,
                None => Self::default_database_path()?,
            };

            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| EdutronError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            debug!("Opening document store at {}", db_path.display());
            Database::new(&db_path)?
        };

        let calculator = match db.load_document::<CostCalculator>(CALCULATOR_KEY) {
            Ok(calculator) => calculator.unwrap_or_default(),
            Err(e) => {
                warn!("Resetting calculator settings: {e}");
                CostCalculator::default()
            }
        };

        let plan = match db.load_document::<PlanState>(PLAN_STATE_KEY)? {
            Some(plan) => plan,
            None => {
                let plan = create_initial_plan_state();
                db.save_documents(&[
                    (PLAN_STATE_KEY, &plan as &dyn ErasedDocument),
                    (CALCULATOR_KEY, &calculator as &dyn ErasedDocument),
                ])?;
                info!("Created new plan {}", plan.id);
                plan
            }
        };

        let history = match db.load_value(PLAN_HISTORY_KEY) {
            Ok(Some(document)) => HistoryState::from_document(document, self.max_history_size)
                .unwrap_or_else(|e| {
                    warn!("Discarding unreadable plan history: {e}");
                    HistoryState::new(self.max_history_size)
                }),
            Ok(None) => HistoryState::new(self.max_history_size),
            Err(e) => {
                warn!("Discarding unreadable plan history: {e}");
                HistoryState::new(self.max_history_size)
            }
        };

        debug!(
            "Restored plan {} with {} undo and {} redo entries",
            plan.id,
            history.undo_stack().len(),
            history.redo_stack().len()
        );
        Ok(Planner::new(
            db,
            WorkingState::new(plan, calculator),
            history,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("edutron")
            .place_data_file("edutron.db")
            .map_err(|e| EdutronError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
