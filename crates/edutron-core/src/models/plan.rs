//! Plan state model and the read-models derived from it.

use std::collections::{BTreeMap, HashMap};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Course, Person, Selections};
use crate::{
    constants::{DEFAULT_CATALOG, DEFAULT_PLAN_TITLE, DEFAULT_TEAM_NAMES},
    ids::generate_id,
};

/// The complete record describing one training plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanState {
    /// Unique identifier for the plan (`plan-...`)
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub notes: String,

    /// Catalog ids the plan draws courses from
    pub catalogs: Vec<String>,

    /// Team ids used in this plan
    pub teams: Vec<String>,

    pub team_members: Vec<Person>,

    pub selections: Selections,

    /// Optional budget in base currency
    pub budget: Option<f64>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last successful mutation (UTC)
    pub updated_at: Timestamp,
}

/// Builds a fresh plan with one default team and one default member.
pub fn create_initial_plan_state() -> PlanState {
    let team_id = generate_id("team");
    let member = Person::new(DEFAULT_TEAM_NAMES[0], Some(team_id.clone()));
    let now = Timestamp::now();

    PlanState {
        id: generate_id("plan"),
        title: DEFAULT_PLAN_TITLE.to_string(),
        notes: String::new(),
        catalogs: vec![DEFAULT_CATALOG.to_string()],
        teams: vec![team_id],
        team_members: vec![member],
        selections: Selections::new(),
        budget: None,
        created_at: now,
        updated_at: now,
    }
}

impl Default for PlanState {
    fn default() -> Self {
        create_initial_plan_state()
    }
}

impl PlanState {
    /// Returns a copy with `updated_at` stamped to now.
    pub fn touched(mut self) -> Self {
        self.updated_at = Timestamp::now();
        self
    }

    /// Looks up a member by id.
    pub fn member(&self, person_id: &str) -> Option<&Person> {
        self.team_members.iter().find(|m| m.id == person_id)
    }

    /// Sum of the prices of every selection. Selections whose course is not
    /// in `courses` contribute nothing.
    pub fn total_cost(&self, courses: &[Course]) -> f64 {
        let prices = price_index(courses);
        self.selections
            .course_ids()
            .filter_map(|id| prices.get(id))
            .sum()
    }

    /// Cost per person id. Every current member appears, at zero when they
    /// have no priced selections; people that only exist in the selections
    /// are included as well.
    pub fn cost_per_member(&self, courses: &[Course]) -> BTreeMap<String, f64> {
        let prices = price_index(courses);
        let mut costs: BTreeMap<String, f64> = self
            .team_members
            .iter()
            .map(|m| (m.id.clone(), 0.0))
            .collect();

        for (person_id, catalogs) in self.selections.iter() {
            let cost: f64 = catalogs
                .values()
                .flatten()
                .filter_map(|id| prices.get(id.as_str()))
                .sum();
            costs.insert(person_id.clone(), cost);
        }
        costs
    }

    /// Number of selections across all people and catalogs.
    pub fn selected_course_count(&self) -> usize {
        self.selections.len()
    }

    /// Whether the plan differs from a freshly created one in any way a
    /// user would care about losing.
    pub fn has_non_default_state(&self) -> bool {
        let custom_title = self.title != DEFAULT_PLAN_TITLE;
        let custom_notes = !self.notes.trim().is_empty();
        let custom_members = self.team_members.len() > 1
            || self
                .team_members
                .first()
                .is_some_and(|m| m.name != DEFAULT_TEAM_NAMES[0]);
        let has_selections = !self.selections.is_empty();
        let has_budget = self.budget.is_some();

        custom_title || custom_notes || custom_members || has_selections || has_budget
    }
}

fn price_index(courses: &[Course]) -> HashMap<&str, f64> {
    courses.iter().map(|c| (c.id.as_str(), c.price)).collect()
}
