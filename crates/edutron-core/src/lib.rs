//! Core library for the Edutron training plan builder.
//!
//! This crate holds the plan state and its history engine: the training
//! plan being edited (roster, per-person course selections, budget), the
//! action log that makes every change undoable, the per-table view history,
//! and the document store that keeps a session across restarts.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): plan state, the selection index and the
//!   [`PlanAction`] union every change is expressed as
//! - **History** ([`history`]): forward application of actions, the bounded
//!   undo/redo log, table view snapshots and the unified undo precedence
//! - **Planner** ([`planner`]): caller-side validation, dispatch and
//!   persistence behind one facade
//! - **Import/Export** ([`import_export`]): the JSON plan document, its
//!   validation and the export file name
//! - **Display** ([`display`]): markdown views for the terminal renderer
//!
//! # Quick Start
//!
//! ```rust
//! use edutron_core::{models::Course, PlannerBuilder};
//!
//! # fn example() -> edutron_core::Result<()> {
//! let mut planner = PlannerBuilder::new().in_memory().build()?;
//! let courses = vec![Course::new("c1", 450.0), Course::new("c2", 750.0)];
//!
//! let person = planner.plan().team_members[0].id.clone();
//! planner.toggle_course(&person, "splunk-step", "c1")?;
//! planner.toggle_course(&person, "splunk-step", "c2")?;
//! planner.set_budget(Some(50.0))?;
//!
//! assert_eq!(planner.total_cost(&courses), 1200.0);
//! assert_eq!(planner.budget_difference(&courses), Some(-1150.0));
//!
//! println!("{}", planner.overview(&courses));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod calculator;
pub mod constants;
pub mod db;
pub mod display;
pub mod error;
pub mod history;
pub mod ids;
pub mod import_export;
pub mod models;
pub mod planner;

// Re-export commonly used types
pub use calculator::CostCalculator;
pub use db::Database;
pub use display::{HistoryOverview, ImportReport, LocalDateTime, OperationStatus, PlanOverview};
pub use error::{EdutronError, Result};
pub use history::{
    HistorySource, HistoryState, TableHistories, TableHistory, UndoCoordinator, UndoRedo,
    WorkingState,
};
pub use import_export::{ImportValidation, PlanDocument, PlanMetadata, PlanMetrics};
pub use models::{Course, Person, PlanAction, PlanState, Selections};
pub use planner::{Planner, PlannerBuilder};
