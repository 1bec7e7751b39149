//! Wrappers that render a plan, its history or an import check.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    calculator::{budget_difference, CostCalculator},
    history::HistoryState,
    import_export::ImportValidation,
    models::{Course, PlanState},
};

/// Full plan view: metadata, budget figures in the active unit and the
/// roster with each member's selection count and cost.
pub struct PlanOverview<'a> {
    pub plan: &'a PlanState,
    pub courses: &'a [Course],
    pub calculator: CostCalculator,
}

impl<'a> PlanOverview<'a> {
    pub fn new(plan: &'a PlanState, courses: &'a [Course], calculator: CostCalculator) -> Self {
        Self {
            plan,
            courses,
            calculator,
        }
    }
}

impl fmt::Display for PlanOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;
        let calc = &self.calculator;

        writeln!(f, "# {}", plan.title)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", plan.id)?;
        writeln!(f, "- **Catalogs**: {}", plan.catalogs.join(", "))?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&plan.created_at))?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&plan.updated_at))?;

        if !plan.notes.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", plan.notes.trim())?;
        }

        let total = plan.total_cost(self.courses);
        writeln!(f, "\n## Budget ({})", calc.unit_label())?;
        writeln!(f)?;
        match plan.budget {
            Some(budget) => writeln!(f, "- **Budget**: {}", calc.format_amount(budget))?,
            None => writeln!(f, "- **Budget**: not set")?,
        }
        writeln!(f, "- **Total cost**: {}", calc.format_amount(total))?;
        if let Some(difference) = budget_difference(plan.budget, total) {
            writeln!(f, "- **Difference**: {}", calc.format_amount(difference))?;
        }

        writeln!(f, "\n## Team ({} members)", plan.team_members.len())?;
        writeln!(f)?;
        let costs = plan.cost_per_member(self.courses);
        for (i, member) in plan.team_members.iter().enumerate() {
            let count = plan
                .selections
                .for_person(&member.id)
                .map_or(0, |catalogs| catalogs.values().map(Vec::len).sum());
            let cost = costs.get(&member.id).copied().unwrap_or_default();
            writeln!(
                f,
                "{}. **{member}** `{}`: {count} courses, {}",
                i + 1,
                member.id,
                calc.format_amount(cost)
            )?;
        }

        Ok(())
    }
}

/// Depth of both stacks and the action each direction would touch next.
pub struct HistoryOverview<'a>(pub &'a HistoryState);

impl fmt::Display for HistoryOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.0;
        let undo = history.undo_stack();
        let redo = history.redo_stack();

        writeln!(f, "## History")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Undo**: {} of {} entries",
            undo.len(),
            history.max_history_size()
        )?;
        writeln!(f, "- **Redo**: {} entries", redo.len())?;

        if undo.is_empty() && redo.is_empty() {
            writeln!(f, "\nNo changes recorded.")?;
            return Ok(());
        }

        if !undo.is_empty() {
            writeln!(f, "\n### Undo (most recent first)")?;
            writeln!(f)?;
            for (i, action) in undo.iter().rev().enumerate() {
                writeln!(f, "{}. {action}", i + 1)?;
            }
        }
        if !redo.is_empty() {
            writeln!(f, "\n### Redo (next first)")?;
            writeln!(f)?;
            for (i, action) in redo.iter().rev().enumerate() {
                writeln!(f, "{}. {action}", i + 1)?;
            }
        }

        Ok(())
    }
}

/// Result of checking an import file.
pub struct ImportReport<'a>(pub &'a ImportValidation);

impl fmt::Display for ImportReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        if !result.is_valid {
            writeln!(f, "## Import failed")?;
            writeln!(f)?;
            writeln!(f, "The file is not a valid plan document:")?;
            writeln!(f)?;
            for error in &result.errors {
                writeln!(f, "- {error}")?;
            }
            return Ok(());
        }

        if let Some(document) = &result.document {
            writeln!(f, "## Import: {}", document.plan.title)?;
            writeln!(f)?;
            writeln!(f, "- **Exported**: {}", document.metadata.exported_at)?;
            writeln!(f, "- **App version**: {}", document.metadata.app_version)?;
            writeln!(f, "- **Members**: {}", document.plan.team_members.len())?;
            writeln!(f, "- **Selections**: {}", document.plan.selected_course_count())?;
        }

        if !result.missing_courses.is_empty() {
            writeln!(f)?;
            writeln!(f, "Courses not found in the current catalog:")?;
            writeln!(f)?;
            for course in &result.missing_courses {
                writeln!(f, "- `{course}`")?;
            }
        }

        Ok(())
    }
}
