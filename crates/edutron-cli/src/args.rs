//! Command-line argument definitions using clap.
//!
//! Argument structures stay free of planner logic: each one only describes
//! what the user typed. The handlers in [`crate::cli`] turn them into
//! planner calls.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Build and track training plans for a team
///
/// Edutron keeps one training plan: a roster of team members, the courses
/// each member takes from one or more catalogs, and an optional budget.
/// Every change can be undone, and plans can be exported to and imported
/// from JSON documents.
#[derive(Parser)]
#[command(version, about, name = "edutron")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/edutron/edutron.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// JSON file with the course catalog (an array of course records)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Running without one shows the plan.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the plan with its budget and roster
    #[command(alias = "s")]
    Show,
    /// Change the plan title
    Title(TitleArgs),
    /// Replace the plan notes
    Notes(NotesArgs),
    /// Set or clear the budget (in base currency)
    Budget(BudgetArgs),
    /// Manage team members
    #[command(alias = "m")]
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Manage course selections
    #[command(alias = "c")]
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },
    /// Clear every course selection
    Reset,
    /// Start over with a fresh plan (undo restores the current one)
    New,
    /// Switch the display between training units and currency
    Credits,
    /// Undo the most recent change
    #[command(alias = "u")]
    Undo,
    /// Redo the most recently undone change
    #[command(alias = "r")]
    Redo,
    /// List the undo and redo history
    History,
    /// Export the plan as a JSON document
    Export(ExportArgs),
    /// Import a plan from a JSON document
    Import(ImportArgs),
}

/// Change the plan title
#[derive(ClapArgs)]
pub struct TitleArgs {
    #[arg(help = "New title (surrounding whitespace is trimmed)")]
    pub title: String,
}

/// Replace the plan notes
#[derive(ClapArgs)]
pub struct NotesArgs {
    #[arg(help = "New notes; pass an empty string to clear them")]
    pub notes: String,
}

/// Set or clear the budget
#[derive(ClapArgs)]
pub struct BudgetArgs {
    #[arg(
        required_unless_present = "clear",
        help = "Budget amount in base currency"
    )]
    pub amount: Option<f64>,
    #[arg(long, conflicts_with = "amount", help = "Remove the budget")]
    pub clear: bool,
}

impl BudgetArgs {
    /// The budget to set, `None` when clearing.
    pub fn budget(&self) -> Option<f64> {
        if self.clear {
            None
        } else {
            self.amount
        }
    }
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a team member (a default name is picked when none is given)
    #[command(alias = "a")]
    Add(AddMemberArgs),
    /// Rename a team member
    #[command(alias = "mv")]
    Rename(RenameMemberArgs),
    /// Remove a team member and their selections
    #[command(alias = "rm")]
    Remove(RemoveMemberArgs),
}

#[derive(ClapArgs)]
pub struct AddMemberArgs {
    #[arg(help = "Name of the new member")]
    pub name: Option<String>,
}

#[derive(ClapArgs)]
pub struct RenameMemberArgs {
    #[arg(help = "Roster position of the member, starting at 1")]
    pub position: usize,
    #[arg(help = "New name")]
    pub name: String,
}

#[derive(ClapArgs)]
pub struct RemoveMemberArgs {
    #[arg(help = "Roster position of the member, starting at 1")]
    pub position: usize,
}

#[derive(Subcommand)]
pub enum CourseCommands {
    /// Select a course for a member, or deselect it if already selected
    #[command(alias = "t")]
    Toggle(ToggleCourseArgs),
}

#[derive(ClapArgs)]
pub struct ToggleCourseArgs {
    #[arg(help = "Member id, or roster position starting at 1")]
    pub person: String,
    #[arg(help = "Course id")]
    pub course_id: String,
    #[arg(long, help = "Catalog the course belongs to (defaults to the plan's first catalog)")]
    pub catalog_id: Option<String>,
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    #[arg(
        short,
        long,
        help = "Output file (defaults to edutron_<date>T<time>_<title>.json in the current directory)"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    #[arg(help = "Plan document to import")]
    pub file: PathBuf,
    #[arg(
        long,
        help = "Proceed even if the plan selects courses missing from the catalog, dropping them"
    )]
    pub drop_missing: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_budget_clear() {
        let args = Args::try_parse_from(["edutron", "budget", "--clear"]).unwrap();
        match args.command {
            Some(Commands::Budget(budget)) => assert_eq!(budget.budget(), None),
            _ => panic!("expected budget command"),
        }

        let args = Args::try_parse_from(["edutron", "budget", "1200"]).unwrap();
        match args.command {
            Some(Commands::Budget(budget)) => assert_eq!(budget.budget(), Some(1200.0)),
            _ => panic!("expected budget command"),
        }

        assert!(Args::try_parse_from(["edutron", "budget"]).is_err());
        assert!(Args::try_parse_from(["edutron", "budget", "5", "--clear"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["edutron", "show", "--no-color", "--catalog", "c.json"]).unwrap();
        assert!(args.no_color);
        assert_eq!(args.catalog, Some(PathBuf::from("c.json")));
    }
}
