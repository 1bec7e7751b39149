//! High-level planner API.
//!
//! [`Planner`] owns the live plan, its undo history and the document store.
//! Every change goes through [`Planner::dispatch`]: the action is applied to
//! a copy of the state, the new plan, history and calculator documents are
//! written in one transaction, and only then does the in-memory state move
//! forward. A rejected action or a failed write leaves everything as it was.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Intent ops     │    │    dispatch     │    │    Database     │
//! │ (team_ops,      │───▶│ (HistoryState + │───▶│  (documents)    │
//! │  plan_ops)      │    │  WorkingState)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   caller validation      apply + record        one transaction
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: opens the store and restores the last session
//! - [`team_ops`]: roster changes (add, rename, remove)
//! - [`plan_ops`]: title, notes, budget, selections, import and export
//!
//! ```rust
//! use edutron_core::PlannerBuilder;
//!
//! # fn example() -> edutron_core::Result<()> {
//! let mut planner = PlannerBuilder::new().in_memory().build()?;
//! planner.update_title("Q3 enablement")?;
//! planner.set_budget(Some(5000.0))?;
//! assert_eq!(planner.plan().title, "Q3 enablement");
//!
//! planner.undo()?;
//! assert_eq!(planner.plan().budget, None);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use log::{debug, warn};
use serde_json::Value;

use crate::{
    calculator::{budget_difference, CostCalculator},
    db::{documents::ErasedDocument, Database, CALCULATOR_KEY, PLAN_HISTORY_KEY, PLAN_STATE_KEY},
    display::{HistoryOverview, PlanOverview},
    error::{EdutronError, Result},
    history::{HistoryState, UndoRedo, WorkingState},
    models::{Course, PlanAction, PlanState},
};

pub mod builder;
pub mod plan_ops;
pub mod team_ops;


pub use builder::PlannerBuilder;

/// Plan store, undo history and persistence behind one interface.
pub struct Planner {
    db: Database,
    state: WorkingState,
    history: HistoryState,
}

impl Planner {
    pub(crate) fn new(db: Database, state: WorkingState, history: HistoryState) -> Self {
        Self { db, state, history }
    }

    /// The live plan.
    pub fn plan(&self) -> &PlanState {
        &self.state.plan
    }

    /// The calculator display mode.
    pub fn calculator(&self) -> CostCalculator {
        self.state.calculator
    }

    pub fn working_state(&self) -> &WorkingState {
        &self.state
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies `action`, records it and persists the result.
    ///
    /// # Errors
    ///
    /// Returns `EdutronError::InvalidAction` when the payload does not fit
    /// the current plan, or `EdutronError::Database` when the write fails.
    /// In both cases the plan and the history are unchanged.
    pub fn dispatch(&mut self, action: PlanAction) -> Result<&PlanState> {
        let action_type = action.action_type();
        let mut history = self.history.clone();
        let next = history.dispatch(&self.state, action).map_err(|e| {
            warn!("Rejected {action_type}: {e}");
            e
        })?;

        self.commit(next, history)?;
        debug!("Dispatched {action_type}");
        Ok(&self.state.plan)
    }

    /// Parses and dispatches a raw action document.
    ///
    /// Returns `Ok(false)` when the `type` tag is unknown: the action is
    /// logged and ignored without touching the plan or the history.
    pub fn dispatch_value(&mut self, value: Value) -> Result<bool> {
        let action = match PlanAction::from_value(value) {
            Ok(action) => action,
            Err(EdutronError::UnknownAction { action_type }) => {
                warn!("Ignoring unknown action type: {action_type}");
                return Ok(false);
            }
            Err(e) => {
                warn!("Rejected raw action: {e}");
                return Err(e);
            }
        };
        self.dispatch(action)?;
        Ok(true)
    }

    /// Reverts the most recent action. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let mut history = self.history.clone();
        let Some(previous) = history.undo()? else {
            debug!("Cannot undo - no history available");
            return Ok(false);
        };
        self.commit(previous, history)?;
        Ok(true)
    }

    /// Re-applies the most recently undone action. Returns false when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        let mut history = self.history.clone();
        let Some(next) = history.redo(&self.state)? else {
            debug!("Cannot redo - no future available");
            return Ok(false);
        };
        self.commit(next, history)?;
        Ok(true)
    }

    /// Sum of all selected course prices, in base currency.
    pub fn total_cost(&self, courses: &[Course]) -> f64 {
        self.state.plan.total_cost(courses)
    }

    /// Budget minus total cost, `None` when no budget is set.
    pub fn budget_difference(&self, courses: &[Course]) -> Option<f64> {
        budget_difference(self.state.plan.budget, self.total_cost(courses))
    }

    /// Markdown view of the plan in the active display unit.
    pub fn overview<'a>(&'a self, courses: &'a [Course]) -> PlanOverview<'a> {
        PlanOverview::new(&self.state.plan, courses, self.state.calculator)
    }

    pub fn history_overview(&self) -> HistoryOverview<'_> {
        HistoryOverview(&self.history)
    }

    /// Writes the new state and history, then adopts them.
    fn commit(&mut self, state: WorkingState, history: HistoryState) -> Result<()> {
        self.db.save_documents(&[
            (PLAN_STATE_KEY, &state.plan as &dyn ErasedDocument),
            (PLAN_HISTORY_KEY, &history as &dyn ErasedDocument),
            (CALCULATOR_KEY, &state.calculator as &dyn ErasedDocument),
        ])?;
        self.state = state;
        self.history = history;
        Ok(())
    }
}

impl UndoRedo for Planner {
    fn can_undo(&self) -> bool {
        Planner::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        Planner::can_redo(self)
    }

    fn undo(&mut self) -> Result<bool> {
        Planner::undo(self)
    }

    fn redo(&mut self) -> Result<bool> {
        Planner::redo(self)
    }
}
