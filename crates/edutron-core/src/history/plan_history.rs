//! Action-sourced undo/redo log for plan changes.
//!
//! The log never stores snapshots per entry. It keeps a single checkpoint,
//! the working state as it was before the oldest action on the undo stack,
//! and rebuilds any earlier state by replaying the remaining actions from
//! there. When the undo stack overflows its bound, the evicted action is
//! folded into the checkpoint, so replay stays exact no matter how many
//! actions have been dropped.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reducer::WorkingState;
use crate::{
    constants::DEFAULT_MAX_HISTORY_SIZE,
    error::{EdutronError, Result},
    models::PlanAction,
};

/// Undo and redo stacks of plan actions, most recent last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    undo_stack: Vec<PlanAction>,
    redo_stack: Vec<PlanAction>,
    max_history_size: usize,
    /// State before the oldest undo entry; present whenever the undo stack
    /// is non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checkpoint: Option<WorkingState>,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_SIZE)
    }
}

impl HistoryState {
    /// Creates an empty history bounded to `max_history_size` undo entries.
    pub fn new(max_history_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history_size,
            checkpoint: None,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[PlanAction] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[PlanAction] {
        &self.redo_stack
    }

    pub fn max_history_size(&self) -> usize {
        self.max_history_size
    }

    /// Applies `action` to `current` and records it.
    ///
    /// On success the action is pushed on the undo stack, the redo stack is
    /// cleared and the oldest entries are evicted past the bound. On error
    /// nothing about the history changes.
    pub fn dispatch(&mut self, current: &WorkingState, action: PlanAction) -> Result<WorkingState> {
        let next = current.apply(&action)?;
        self.push_undo(current, action);
        let discarded = std::mem::take(&mut self.redo_stack);
        if !discarded.is_empty() {
            debug!("Discarded {} redo entries", discarded.len());
        }
        Ok(next)
    }

    /// Reverts the most recent action.
    ///
    /// Returns the state as if that action had never been applied, or
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<WorkingState>> {
        let Some(last) = self.undo_stack.len().checked_sub(1) else {
            return Ok(None);
        };
        let checkpoint = self.checkpoint.as_ref().ok_or_else(|| EdutronError::Configuration {
            message: "undo history has no checkpoint to replay from".to_string(),
        })?;

        let mut state = checkpoint.clone();
        for action in &self.undo_stack[..last] {
            state = state.apply(action)?;
        }
        state.plan = state.plan.touched();

        if let Some(action) = self.undo_stack.pop() {
            debug!("Undid {}", action.action_type());
            self.redo_stack.push(action);
        }
        Ok(Some(state))
    }

    /// Re-applies the most recently undone action to `current`.
    pub fn redo(&mut self, current: &WorkingState) -> Result<Option<WorkingState>> {
        let Some(action) = self.redo_stack.last() else {
            return Ok(None);
        };
        let next = current.apply(action)?;

        if let Some(action) = self.redo_stack.pop() {
            debug!("Redid {}", action.action_type());
            self.push_undo(current, action);
        }
        Ok(Some(next))
    }

    fn push_undo(&mut self, before: &WorkingState, action: PlanAction) {
        if self.undo_stack.is_empty() {
            self.checkpoint = Some(before.clone());
        }
        self.undo_stack.push(action);
        self.enforce_bound();
    }

    fn enforce_bound(&mut self) {
        while self.undo_stack.len() > self.max_history_size {
            let evicted = self.undo_stack.remove(0);
            self.checkpoint = match self.checkpoint.take().map(|c| c.apply(&evicted)) {
                Some(Ok(advanced)) => Some(advanced),
                Some(Err(e)) => {
                    warn!("Dropping undo history: evicted action no longer replays: {e}");
                    self.undo_stack.clear();
                    None
                }
                None => None,
            };
        }
        if self.undo_stack.is_empty() && self.redo_stack.is_empty() {
            self.checkpoint = None;
        }
    }

    /// Rebuilds a history from a persisted document.
    ///
    /// Entries with an unknown `type` tag are logged and skipped, as are
    /// entries whose payload no longer parses. An undo stack that arrives
    /// without a checkpoint cannot be replayed and is dropped.
    pub fn from_document(document: Value, max_history_size: usize) -> Result<Self> {
        let raw: RawHistory = serde_json::from_value(document)?;

        let mut history = Self {
            undo_stack: parse_actions(raw.undo_stack),
            redo_stack: parse_actions(raw.redo_stack),
            max_history_size,
            checkpoint: raw.checkpoint,
        };

        if history.checkpoint.is_none() && !history.undo_stack.is_empty() {
            warn!(
                "Persisted history has {} undo entries but no checkpoint; dropping them",
                history.undo_stack.len()
            );
            history.undo_stack.clear();
        }
        history.enforce_bound();
        Ok(history)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHistory {
    #[serde(default)]
    undo_stack: Vec<Value>,
    #[serde(default)]
    redo_stack: Vec<Value>,
    #[serde(default)]
    checkpoint: Option<WorkingState>,
}

fn parse_actions(values: Vec<Value>) -> Vec<PlanAction> {
    values
        .into_iter()
        .filter_map(|value| match PlanAction::from_value(value) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!("Ignoring persisted history entry: {e}");
                None
            }
        })
        .collect()
}
