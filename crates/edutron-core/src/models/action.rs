//! Plan actions: the unit of change recorded in the undo history.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Person, PlanState};
use crate::error::{EdutronError, Result};

/// A single mutation of a plan.
///
/// Every change a user makes is expressed as one of these values, applied by
/// the history engine and then stored verbatim on its undo stack. Payloads
/// carry what is needed to apply the change forward; the `old_*` fields only
/// serve descriptions and staleness checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum PlanAction {
    AddTeamMember {
        member: Person,
        index: usize,
    },
    RemoveTeamMember {
        member: Person,
        index: usize,
    },
    UpdateTeamMember {
        index: usize,
        old_member: Person,
        new_member: Person,
    },
    ToggleCourseSelection {
        person_id: String,
        catalog_id: String,
        course_id: String,
        was_selected: bool,
    },
    UpdateTitle {
        old_title: String,
        new_title: String,
    },
    UpdateNotes {
        old_notes: String,
        new_notes: String,
    },
    SetBudget {
        old_budget: Option<f64>,
        new_budget: Option<f64>,
    },
    /// Clears every selection. Forward only: nothing is restored on replay.
    ResetSelections,
    /// Replaces the whole plan. `None` models a document whose state was
    /// null and is always rejected.
    ImportPlan {
        new_plan_state: Option<Box<PlanState>>,
    },
    /// Flips the calculator between training units and currency.
    ToggleCreditsMode {
        new_mode: bool,
    },
}

/// Every type tag this engine understands.
pub const ACTION_TYPES: [&str; 10] = [
    "ADD_TEAM_MEMBER",
    "REMOVE_TEAM_MEMBER",
    "UPDATE_TEAM_MEMBER",
    "TOGGLE_COURSE_SELECTION",
    "UPDATE_TITLE",
    "UPDATE_NOTES",
    "SET_BUDGET",
    "RESET_SELECTIONS",
    "IMPORT_PLAN",
    "TOGGLE_CREDITS_MODE",
];

impl PlanAction {
    /// Wire tag of this action, e.g. `SET_BUDGET`.
    pub fn action_type(&self) -> &'static str {
        match self {
            PlanAction::AddTeamMember { .. } => "ADD_TEAM_MEMBER",
            PlanAction::RemoveTeamMember { .. } => "REMOVE_TEAM_MEMBER",
            PlanAction::UpdateTeamMember { .. } => "UPDATE_TEAM_MEMBER",
            PlanAction::ToggleCourseSelection { .. } => "TOGGLE_COURSE_SELECTION",
            PlanAction::UpdateTitle { .. } => "UPDATE_TITLE",
            PlanAction::UpdateNotes { .. } => "UPDATE_NOTES",
            PlanAction::SetBudget { .. } => "SET_BUDGET",
            PlanAction::ResetSelections => "RESET_SELECTIONS",
            PlanAction::ImportPlan { .. } => "IMPORT_PLAN",
            PlanAction::ToggleCreditsMode { .. } => "TOGGLE_CREDITS_MODE",
        }
    }

    /// Builds an `IMPORT_PLAN` action for the given state.
    pub fn import(state: PlanState) -> Self {
        PlanAction::ImportPlan {
            new_plan_state: Some(Box::new(state)),
        }
    }

    /// Parses a raw action document.
    ///
    /// A `type` tag outside [`ACTION_TYPES`] yields
    /// [`EdutronError::UnknownAction`]; a known tag with a payload that does
    /// not fit yields [`EdutronError::InvalidAction`].
    pub fn from_value(value: Value) -> Result<Self> {
        let action_type = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| EdutronError::UnknownAction {
                action_type: "<missing>".to_string(),
            })?;

        if !ACTION_TYPES.contains(&action_type.as_str()) {
            return Err(EdutronError::UnknownAction { action_type });
        }

        serde_json::from_value(value)
            .map_err(|e| EdutronError::invalid_action(action_type, e.to_string()))
    }

    /// Checks the payload against the plan it is about to be applied to.
    ///
    /// Runs before anything is mutated, so a rejected action leaves the plan
    /// and both history stacks untouched.
    pub fn validate(&self, plan: &PlanState) -> Result<()> {
        let reject = |reason: String| Err(EdutronError::invalid_action(self.action_type(), reason));
        let members = &plan.team_members;

        match self {
            PlanAction::AddTeamMember { member, index } => {
                if *index > members.len() {
                    return reject(format!(
                        "index {index} is past the end of a roster of {}",
                        members.len()
                    ));
                }
                if member.id.trim().is_empty() {
                    return reject("member id is empty".to_string());
                }
                if members.iter().any(|m| m.id == member.id) {
                    return reject(format!("member id '{}' already exists", member.id));
                }
            }
            PlanAction::RemoveTeamMember { member, index } => match members.get(*index) {
                None => return reject(format!("no member at index {index}")),
                Some(current) if current.id != member.id => {
                    return reject(format!(
                        "member at index {index} is '{}', not '{}'",
                        current.id, member.id
                    ))
                }
                Some(_) => {}
            },
            PlanAction::UpdateTeamMember {
                index, new_member, ..
            } => match members.get(*index) {
                None => return reject(format!("no member at index {index}")),
                Some(current) if current.id != new_member.id => {
                    return reject(format!(
                        "member at index {index} is '{}', not '{}'",
                        current.id, new_member.id
                    ))
                }
                Some(_) => {}
            },
            PlanAction::ToggleCourseSelection {
                person_id,
                catalog_id,
                course_id,
                ..
            } => {
                if person_id.is_empty() || catalog_id.is_empty() || course_id.is_empty() {
                    return reject("person, catalog and course ids are required".to_string());
                }
            }
            PlanAction::SetBudget { new_budget, .. } => {
                if let Some(budget) = new_budget {
                    if !budget.is_finite() || *budget < 0.0 {
                        return reject(format!("budget {budget} is not a non-negative amount"));
                    }
                }
            }
            PlanAction::ImportPlan { new_plan_state } => match new_plan_state {
                None => return reject("new plan state is missing".to_string()),
                Some(state) if state.id.trim().is_empty() => {
                    return reject("new plan state has no id".to_string())
                }
                Some(_) => {}
            },
            PlanAction::UpdateTitle { .. }
            | PlanAction::UpdateNotes { .. }
            | PlanAction::ResetSelections
            | PlanAction::ToggleCreditsMode { .. } => {}
        }
        Ok(())
    }
}
