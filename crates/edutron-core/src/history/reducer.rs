//! Forward application of plan actions.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    calculator::CostCalculator,
    error::{EdutronError, Result},
    models::{PlanAction, PlanState, Selections},
};

/// Everything an action can change: the plan itself and the calculator
/// display mode toggled by `TOGGLE_CREDITS_MODE`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkingState {
    pub plan: PlanState,
    #[serde(default)]
    pub calculator: CostCalculator,
}

impl WorkingState {
    pub fn new(plan: PlanState, calculator: CostCalculator) -> Self {
        Self { plan, calculator }
    }

    /// Applies `action` and returns the resulting state with `updatedAt`
    /// stamped. `self` is never modified; an invalid payload returns an
    /// error and no state.
    pub fn apply(&self, action: &PlanAction) -> Result<WorkingState> {
        action.validate(&self.plan)?;

        let mut next = self.clone();
        let plan = &mut next.plan;

        match action {
            PlanAction::AddTeamMember { member, index } => {
                plan.team_members.insert(*index, member.clone());
            }
            PlanAction::RemoveTeamMember { member, index } => {
                plan.team_members.remove(*index);
                plan.selections = plan.selections.without_person(&member.id);
            }
            PlanAction::UpdateTeamMember {
                index, new_member, ..
            } => {
                plan.team_members[*index] = new_member.clone();
            }
            PlanAction::ToggleCourseSelection {
                person_id,
                catalog_id,
                course_id,
                was_selected,
            } => {
                plan.selections = if *was_selected {
                    plan.selections
                        .without_course(person_id, catalog_id, course_id)
                } else {
                    plan.selections.with_course(person_id, catalog_id, course_id)
                };
            }
            PlanAction::UpdateTitle { new_title, .. } => plan.title = new_title.clone(),
            PlanAction::UpdateNotes { new_notes, .. } => plan.notes = new_notes.clone(),
            PlanAction::SetBudget { new_budget, .. } => plan.budget = *new_budget,
            PlanAction::ResetSelections => plan.selections = Selections::new(),
            PlanAction::ImportPlan { new_plan_state } => {
                let state = new_plan_state.as_deref().ok_or_else(|| {
                    EdutronError::invalid_action(action.action_type(), "new plan state is missing")
                })?;
                *plan = state.clone();
            }
            PlanAction::ToggleCreditsMode { new_mode } => {
                next.calculator.credits_mode = *new_mode;
            }
        }

        next.plan = next.plan.touched();
        debug!("Applied {} to plan {}", action.action_type(), next.plan.id);
        Ok(next)
    }
}
