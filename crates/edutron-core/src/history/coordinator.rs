//! One undo/redo affordance over the plan log and a table history.
//!
//! Plan edits always drain first: undo reverts the plan while it has
//! anything to undo, and only then falls through to the table's view
//! history. Redo checks the plan first in the same way.

use log::debug;

use super::{table_history::TableHistory, UndoRedo};
use crate::error::Result;

/// Which history an undo or redo acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    Plan,
    Table,
}

impl HistorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistorySource::Plan => "plan",
            HistorySource::Table => "table",
        }
    }
}

/// Borrows a plan history and a table history for one unified operation.
pub struct UndoCoordinator<'a, P: UndoRedo, T: UndoRedo = TableHistory> {
    plan: &'a mut P,
    table: &'a mut T,
}

impl<'a, P: UndoRedo, T: UndoRedo> UndoCoordinator<'a, P, T> {
    pub fn new(plan: &'a mut P, table: &'a mut T) -> Self {
        Self { plan, table }
    }

    pub fn can_undo(&self) -> bool {
        self.plan.can_undo() || self.table.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.plan.can_redo() || self.table.can_redo()
    }

    /// Undoes in the plan if possible, otherwise in the table.
    pub fn undo(&mut self) -> Result<Option<HistorySource>> {
        if self.plan.can_undo() {
            debug!("Executing plan undo");
            return Ok(self.plan.undo()?.then_some(HistorySource::Plan));
        }
        if self.table.can_undo() {
            debug!("Executing table undo");
            return Ok(self.table.undo()?.then_some(HistorySource::Table));
        }
        debug!("No undo available");
        Ok(None)
    }

    /// Redoes in the plan if possible, otherwise in the table.
    pub fn redo(&mut self) -> Result<Option<HistorySource>> {
        if self.plan.can_redo() {
            debug!("Executing plan redo");
            return Ok(self.plan.redo()?.then_some(HistorySource::Plan));
        }
        if self.table.can_redo() {
            debug!("Executing table redo");
            return Ok(self.table.redo()?.then_some(HistorySource::Table));
        }
        debug!("No redo available");
        Ok(None)
    }
}
