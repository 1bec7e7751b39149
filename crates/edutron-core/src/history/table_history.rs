//! Snapshot-based undo/redo for table view state.
//!
//! Each table (catalog browser, planner grid, ...) owns one
//! [`TableHistory`]. Unlike the plan log it stores whole
//! `{sorting, filters, columnOrder}` snapshots, is never persisted and is
//! never exported with a plan.
//!
//! Filter edits are debounced: the snapshot taken before a filter change
//! stays pending until the quiet period passes, and a newer filter change
//! replaces it. Any other history event commits a pending snapshot first so
//! entries always land in the order the changes happened.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::FILTER_DEBOUNCE_MS;

/// Sort applied to one column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

/// Filter applied to one column. The value is whatever the column's filter
/// widget produces (text, range, list of facets).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnFilter {
    pub id: String,
    pub value: Value,
}

/// View state of a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableViewState {
    pub sorting: Vec<ColumnSort>,
    pub filters: Vec<ColumnFilter>,
    pub column_order: Vec<String>,
}

impl TableViewState {
    /// True when no sorting, filters or custom column order are set.
    pub fn is_empty(&self) -> bool {
        self.sorting.is_empty() && self.filters.is_empty() && self.column_order.is_empty()
    }
}

#[derive(Debug, Clone)]
struct PendingSnapshot {
    snapshot: TableViewState,
    due: Instant,
}

/// Undo/redo history for one table.
#[derive(Debug, Clone)]
pub struct TableHistory {
    table_id: String,
    present: TableViewState,
    past: Vec<TableViewState>,
    future: Vec<TableViewState>,
    pending: Option<PendingSnapshot>,
    debounce: Duration,
}

impl TableHistory {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            present: TableViewState::default(),
            past: Vec::new(),
            future: Vec::new(),
            pending: None,
            debounce: Duration::from_millis(FILTER_DEBOUNCE_MS),
        }
    }

    /// Sets the quiet period for filter snapshots.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// The live view state the table renders.
    pub fn state(&self) -> &TableViewState {
        &self.present
    }

    /// Whether a filter snapshot is waiting for its quiet period.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn past_len(&self) -> usize {
        self.past.len() + usize::from(self.pending.is_some())
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty() || self.pending.is_some()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn on_sorting_change(&mut self, sorting: Vec<ColumnSort>) {
        self.flush();
        self.record(self.present.clone());
        self.present.sorting = sorting;
    }

    pub fn on_column_order_change(&mut self, column_order: Vec<String>) {
        self.flush();
        self.record(self.present.clone());
        self.present.column_order = column_order;
    }

    pub fn on_filters_change(&mut self, filters: Vec<ColumnFilter>) {
        self.on_filters_change_at(filters, Instant::now());
    }

    /// Applies a filter change at `now`. The pre-change snapshot becomes
    /// pending and replaces any snapshot still pending from an earlier
    /// keystroke.
    pub fn on_filters_change_at(&mut self, filters: Vec<ColumnFilter>, now: Instant) {
        if self.pending.is_some() {
            debug!("[{}] Superseding pending filter snapshot", self.table_id);
        }
        self.pending = Some(PendingSnapshot {
            snapshot: self.present.clone(),
            due: now + self.debounce,
        });
        self.present.filters = filters;
    }

    /// Commits the pending snapshot if its quiet period has passed by
    /// `now`. Returns whether an entry was recorded.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| p.due <= now);
        due && self.flush()
    }

    /// Commits the pending snapshot immediately, if there is one.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.record(pending.snapshot);
                true
            }
            None => false,
        }
    }

    /// Restores the previous view state. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        self.flush();
        let Some(previous) = self.past.pop() else {
            debug!("[{}] Cannot undo - no history available", self.table_id);
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        debug!("[{}] Undid table change", self.table_id);
        true
    }

    /// Re-applies the most recently undone view state.
    pub fn redo(&mut self) -> bool {
        self.flush();
        let Some(next) = self.future.pop() else {
            debug!("[{}] Cannot redo - no future available", self.table_id);
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        debug!("[{}] Redid table change", self.table_id);
        true
    }

    /// Clears sorting, filters and column order as one undoable step.
    /// Returns false, recording nothing, when there is nothing to clear.
    pub fn reset(&mut self) -> bool {
        self.flush();
        if self.present.is_empty() {
            debug!("[{}] No table settings to reset", self.table_id);
            return false;
        }
        self.record(self.present.clone());
        self.present = TableViewState::default();
        true
    }

    fn record(&mut self, snapshot: TableViewState) {
        debug!("[{}] Saving to history: {:?}", self.table_id, snapshot);
        self.past.push(snapshot);
        self.future.clear();
    }
}

/// Table histories keyed by table id.
#[derive(Debug, Default)]
pub struct TableHistories {
    tables: HashMap<String, TableHistory>,
    debounce: Option<Duration>,
}

impl TableHistories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Debounce applied to tables created from now on.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    /// History for `table_id`, created empty on first use.
    pub fn table(&mut self, table_id: &str) -> &mut TableHistory {
        let debounce = self.debounce;
        self.tables.entry(table_id.to_string()).or_insert_with(|| {
            let history = TableHistory::new(table_id);
            match debounce {
                Some(d) => history.with_debounce(d),
                None => history,
            }
        })
    }

    pub fn get(&self, table_id: &str) -> Option<&TableHistory> {
        self.tables.get(table_id)
    }

    /// Commits every pending filter snapshot that is due by `now`.
    pub fn poll(&mut self, now: Instant) {
        for history in self.tables.values_mut() {
            history.poll(now);
        }
    }
}
