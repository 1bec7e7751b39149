//! Undo/redo machinery.
//!
//! Two independent histories exist side by side:
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────┐
//! │   HistoryState   │        │   TableHistory   │
//! │  (plan actions,  │        │ (view snapshots, │
//! │   persisted)     │        │  per table id)   │
//! └────────┬─────────┘        └────────┬─────────┘
//!          └────────────┬──────────────┘
//!                       ▼
//!              ┌──────────────────┐
//!              │  UndoCoordinator │  plan first, then table
//!              └──────────────────┘
//! ```
//!
//! - [`reducer`]: forward application of a [`PlanAction`](crate::models::PlanAction)
//!   to a [`WorkingState`].
//! - [`plan_history`]: the bounded action log with checkpoint replay.
//! - [`table_history`]: debounced snapshot history for table view state.
//! - [`coordinator`]: the unified undo/redo precedence rule.

pub mod coordinator;
pub mod plan_history;
pub mod reducer;
pub mod table_history;


pub use coordinator::{HistorySource, UndoCoordinator};
pub use plan_history::HistoryState;
pub use reducer::WorkingState;
pub use table_history::{ColumnFilter, ColumnSort, TableHistories, TableHistory, TableViewState};

use crate::error::Result;

/// Something with an undo and a redo stack.
pub trait UndoRedo {
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    /// Returns whether anything was undone.
    fn undo(&mut self) -> Result<bool>;
    /// Returns whether anything was redone.
    fn redo(&mut self) -> Result<bool>;
}

impl UndoRedo for TableHistory {
    fn can_undo(&self) -> bool {
        TableHistory::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        TableHistory::can_redo(self)
    }

    fn undo(&mut self) -> Result<bool> {
        Ok(TableHistory::undo(self))
    }

    fn redo(&mut self) -> Result<bool> {
        Ok(TableHistory::redo(self))
    }
}
