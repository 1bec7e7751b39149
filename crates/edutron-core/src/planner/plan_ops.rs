//! Plan-level operations for the Planner.

use jiff::{Timestamp, Zoned};
use log::info;

use super::Planner;
use crate::{
    error::{EdutronError, Result},
    import_export::{self, ImportValidation, PlanDocument},
    models::{create_initial_plan_state, Course, PlanAction, PlanState},
};

impl Planner {
    /// Changes the plan title. Surrounding whitespace is dropped and a blank
    /// title is refused.
    pub fn update_title(&mut self, title: &str) -> Result<()> {
        let new_title = title.trim();
        if new_title.is_empty() {
            return Err(EdutronError::invalid_input("title").with_reason("Title cannot be empty"));
        }
        let old_title = self.plan().title.clone();
        self.dispatch(PlanAction::UpdateTitle {
            old_title,
            new_title: new_title.to_string(),
        })?;
        Ok(())
    }

    pub fn update_notes(&mut self, notes: &str) -> Result<()> {
        let old_notes = self.plan().notes.clone();
        self.dispatch(PlanAction::UpdateNotes {
            old_notes,
            new_notes: notes.to_string(),
        })?;
        Ok(())
    }

    /// Sets the budget in base currency, or clears it with `None`.
    pub fn set_budget(&mut self, budget: Option<f64>) -> Result<()> {
        if let Some(amount) = budget {
            if !amount.is_finite() || amount < 0.0 {
                return Err(EdutronError::invalid_input("budget")
                    .with_reason(format!("{amount} is not a non-negative amount")));
            }
        }
        let old_budget = self.plan().budget;
        self.dispatch(PlanAction::SetBudget {
            old_budget,
            new_budget: budget,
        })?;
        Ok(())
    }

    /// Selects the course for the person, or deselects it when it is
    /// already selected. Returns whether the course is now selected.
    pub fn toggle_course(
        &mut self,
        person_id: &str,
        catalog_id: &str,
        course_id: &str,
    ) -> Result<bool> {
        if self.plan().member(person_id).is_none() {
            return Err(EdutronError::invalid_input("person_id")
                .with_reason(format!("no team member with id '{person_id}'")));
        }
        let was_selected = self
            .plan()
            .selections
            .contains(person_id, catalog_id, course_id);

        self.dispatch(PlanAction::ToggleCourseSelection {
            person_id: person_id.to_string(),
            catalog_id: catalog_id.to_string(),
            course_id: course_id.to_string(),
            was_selected,
        })?;
        Ok(!was_selected)
    }

    /// Clears every selection as one undoable step.
    pub fn reset_selections(&mut self) -> Result<()> {
        self.dispatch(PlanAction::ResetSelections)?;
        Ok(())
    }

    /// Replaces the whole plan as one undoable step.
    pub fn import_plan(&mut self, plan: PlanState) -> Result<()> {
        info!("Importing plan {} ({})", plan.id, plan.title);
        self.dispatch(PlanAction::import(plan))?;
        Ok(())
    }

    /// Commits a validated import. With `drop_missing`, selections of
    /// courses absent from the catalog are stripped first; without it such
    /// an import is refused.
    pub fn apply_import(&mut self, validation: ImportValidation, drop_missing: bool) -> Result<()> {
        let plan = validation.into_plan(drop_missing)?;
        self.import_plan(plan)
    }

    /// Starts over with a fresh plan. Undo brings the previous one back.
    pub fn create_new_plan(&mut self) -> Result<()> {
        self.import_plan(create_initial_plan_state())
    }

    /// Flips between training units and currency. Returns the new mode.
    pub fn toggle_credits_mode(&mut self) -> Result<bool> {
        let new_mode = !self.calculator().credits_mode;
        self.dispatch(PlanAction::ToggleCreditsMode { new_mode })?;
        Ok(new_mode)
    }

    /// Whether the current plan holds work that an import would overwrite.
    pub fn has_non_default_plan_state(&self) -> bool {
        self.plan().has_non_default_state()
    }

    /// Builds the export document for the current plan.
    pub fn export(&self, courses: &[Course]) -> PlanDocument {
        import_export::build_export(self.plan(), courses, Timestamp::now())
    }

    /// Suggested file name for exporting the current plan right now.
    pub fn export_filename(&self) -> String {
        import_export::export_filename(&self.plan().title, &Zoned::now())
    }
}
