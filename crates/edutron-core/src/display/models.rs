//! Display implementations for domain models.

use std::fmt;

use crate::models::{PlanAction, Person};

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(role) = &self.role {
            write!(f, " ({role})")?;
        }
        Ok(())
    }
}

/// One-line description of the change, as shown in history listings.
impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanAction::AddTeamMember { member, .. } => {
                write!(f, "Added team member {}", member.name)
            }
            PlanAction::RemoveTeamMember { member, .. } => {
                write!(f, "Removed team member {}", member.name)
            }
            PlanAction::UpdateTeamMember {
                old_member,
                new_member,
                ..
            } => write!(f, "Renamed {} to {}", old_member.name, new_member.name),
            PlanAction::ToggleCourseSelection {
                person_id,
                catalog_id,
                course_id,
                was_selected,
            } => {
                let verb = if *was_selected { "Deselected" } else { "Selected" };
                write!(f, "{verb} {course_id} ({catalog_id}) for {person_id}")
            }
            PlanAction::UpdateTitle { new_title, .. } => {
                write!(f, "Changed title to \"{new_title}\"")
            }
            PlanAction::UpdateNotes { new_notes, .. } if new_notes.trim().is_empty() => {
                write!(f, "Cleared notes")
            }
            PlanAction::UpdateNotes { .. } => write!(f, "Updated notes"),
            PlanAction::SetBudget {
                new_budget: Some(budget),
                ..
            } => write!(f, "Set budget to {budget}"),
            PlanAction::SetBudget {
                new_budget: None, ..
            } => write!(f, "Cleared budget"),
            PlanAction::ResetSelections => write!(f, "Reset all course selections"),
            PlanAction::ImportPlan {
                new_plan_state: Some(state),
            } => write!(f, "Loaded plan \"{}\"", state.title),
            PlanAction::ImportPlan {
                new_plan_state: None,
            } => write!(f, "Loaded plan (no state)"),
            PlanAction::ToggleCreditsMode { new_mode: true } => {
                write!(f, "Switched to training units")
            }
            PlanAction::ToggleCreditsMode { new_mode: false } => write!(f, "Switched to currency"),
        }
    }
}
