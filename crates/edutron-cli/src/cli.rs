//! Command handlers.
//!
//! Each handler maps one command onto a planner call and renders the
//! outcome. Validation beyond argument parsing stays in the planner.

use std::{fs, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use edutron_core::{
    import_export::{parse_import, validate_import},
    models::Course,
    ImportReport, Planner,
};
use log::{info, warn};

use crate::{
    args::{
        BudgetArgs, Commands, CourseCommands, ExportArgs, ImportArgs, MemberCommands,
        ToggleCourseArgs,
    },
    renderer::TerminalRenderer,
};

/// Planner plus everything a command needs to render its result.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    /// `None` when no catalog file was given
    courses: Option<Vec<Course>>,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, courses: Option<Vec<Course>>) -> Self {
        Self {
            planner,
            renderer,
            courses,
        }
    }

    fn courses(&self) -> &[Course] {
        self.courses.as_deref().unwrap_or_default()
    }

    /// Runs `command`, or shows the plan when there is none.
    pub fn run(mut self, command: Option<Commands>) -> Result<()> {
        let Some(command) = command else {
            return self.show();
        };

        match command {
            Commands::Show => self.show(),
            Commands::Title(args) => {
                self.planner.update_title(&args.title)?;
                self.renderer
                    .success(format!("Title set to \"{}\"", self.planner.plan().title));
                Ok(())
            }
            Commands::Notes(args) => {
                self.planner.update_notes(&args.notes)?;
                self.renderer.success("Notes updated");
                Ok(())
            }
            Commands::Budget(args) => self.budget(&args),
            Commands::Member { command } => self.member(command),
            Commands::Course {
                command: CourseCommands::Toggle(args),
            } => self.toggle_course(args),
            Commands::Reset => {
                self.planner.reset_selections()?;
                self.renderer.success("All course selections cleared");
                Ok(())
            }
            Commands::New => {
                if self.planner.has_non_default_plan_state() {
                    warn!("Replacing a plan with unsaved changes; undo restores it");
                }
                self.planner.create_new_plan()?;
                self.renderer
                    .success(format!("Started new plan {}", self.planner.plan().id));
                Ok(())
            }
            Commands::Credits => {
                let credits = self.planner.toggle_credits_mode()?;
                let unit = if credits { "training units" } else { "currency" };
                self.renderer.success(format!("Showing amounts in {unit}"));
                Ok(())
            }
            Commands::Undo => self.undo(),
            Commands::Redo => self.redo(),
            Commands::History => {
                self.renderer.render(self.planner.history_overview());
                Ok(())
            }
            Commands::Export(args) => self.export(args),
            Commands::Import(args) => self.import(args),
        }
    }

    fn show(&self) -> Result<()> {
        if self.courses.is_none() {
            info!("No catalog given; course prices count as zero");
        }
        self.renderer.render(self.planner.overview(self.courses()));
        Ok(())
    }

    fn budget(&mut self, args: &BudgetArgs) -> Result<()> {
        let budget = args.budget();
        self.planner.set_budget(budget)?;

        let calculator = self.planner.calculator();
        match budget {
            Some(amount) => self
                .renderer
                .success(format!("Budget set to {}", calculator.format_amount(amount))),
            None => self.renderer.success("Budget cleared"),
        }
        Ok(())
    }

    fn member(&mut self, command: MemberCommands) -> Result<()> {
        match command {
            MemberCommands::Add(args) => {
                let member = self.planner.add_team_member(args.name.as_deref())?;
                self.renderer
                    .success(format!("Added {} ({})", member.name, member.id));
            }
            MemberCommands::Rename(args) => {
                let index = roster_index(args.position)?;
                if self.planner.rename_team_member(index, &args.name)? {
                    self.renderer
                        .success(format!("Member {} renamed to {}", args.position, args.name.trim()));
                } else {
                    self.renderer.success("Name unchanged");
                }
            }
            MemberCommands::Remove(args) => {
                let index = roster_index(args.position)?;
                let member = self.planner.remove_team_member(index)?;
                self.renderer.success(format!("Removed {}", member.name));
            }
        }
        Ok(())
    }

    fn toggle_course(&mut self, args: ToggleCourseArgs) -> Result<()> {
        let plan = self.planner.plan();
        let person_id = match plan.member(&args.person) {
            Some(member) => member.id.clone(),
            None => {
                let index = args
                    .person
                    .parse::<usize>()
                    .ok()
                    .and_then(|position| position.checked_sub(1))
                    .ok_or_else(|| anyhow!("No team member with id '{}'", args.person))?;
                plan.team_members
                    .get(index)
                    .map(|m| m.id.clone())
                    .ok_or_else(|| anyhow!("No team member at position {}", args.person))?
            }
        };
        let catalog_id = match args.catalog_id {
            Some(id) => id,
            None => plan
                .catalogs
                .first()
                .cloned()
                .context("The plan has no catalogs")?,
        };

        if self.courses.is_some() && !self.courses().iter().any(|c| c.id == args.course_id) {
            warn!("Course {} is not in the loaded catalog", args.course_id);
        }

        let selected = self
            .planner
            .toggle_course(&person_id, &catalog_id, &args.course_id)?;
        let verb = if selected { "Selected" } else { "Deselected" };
        self.renderer
            .success(format!("{verb} {} for {person_id}", args.course_id));
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        let next = self.planner.history().undo_stack().last().cloned();
        if self.planner.undo()? {
            let description = next.map(|a| a.to_string()).unwrap_or_default();
            self.renderer.success(format!("Undid: {description}"));
        } else {
            self.renderer.success("Nothing to undo");
        }
        Ok(())
    }

    fn redo(&mut self) -> Result<()> {
        let next = self.planner.history().redo_stack().last().cloned();
        if self.planner.redo()? {
            let description = next.map(|a| a.to_string()).unwrap_or_default();
            self.renderer.success(format!("Redid: {description}"));
        } else {
            self.renderer.success("Nothing to redo");
        }
        Ok(())
    }

    fn export(&self, args: ExportArgs) -> Result<()> {
        let document = self.planner.export(self.courses());
        let json = serde_json::to_string_pretty(&document).context("Failed to serialize plan")?;
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from(self.planner.export_filename()));

        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        self.renderer
            .success(format!("Exported plan to {}", path.display()));
        Ok(())
    }

    fn import(&mut self, args: ImportArgs) -> Result<()> {
        let text = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let value = parse_import(&text)?;

        let mut result = validate_import(&value, self.courses());
        if self.courses.is_none() && !result.missing_courses.is_empty() {
            info!("No catalog given; skipping the course check");
            result.missing_courses.clear();
        }

        self.renderer.render(ImportReport(&result));
        if !result.is_valid {
            bail!("Import refused: the file is not a valid plan document");
        }
        if !result.missing_courses.is_empty() && !args.drop_missing {
            bail!("Import cancelled: rerun with --drop-missing to import without the missing courses");
        }
        if self.planner.has_non_default_plan_state() {
            warn!("Replacing a plan with unsaved changes; undo restores it");
        }

        self.planner.apply_import(result, args.drop_missing)?;
        self.renderer
            .success(format!("Imported \"{}\"", self.planner.plan().title));
        Ok(())
    }
}

/// Converts a 1-based roster position to an index.
fn roster_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Roster positions start at 1"))
}
