//! Data models for training plans.
//!
//! - [`PlanState`]: the canonical record for one plan (roster, selections,
//!   budget, title, notes, timestamps) together with its derived cost
//!   read-models.
//! - [`Selections`]: the pruned `person -> catalog -> [course]` index.
//! - [`Person`] and [`Course`]: roster entries and read-only catalog rows.
//! - [`PlanAction`]: the tagged mutation values the history engine applies
//!   and records.
//!
//! Display implementations live in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use edutron_core::models::{create_initial_plan_state, Course};
//!
//! let mut plan = create_initial_plan_state();
//! let person = plan.team_members[0].id.clone();
//! plan.selections = plan.selections.with_course(&person, "splunk-step", "c1");
//!
//! let catalog = vec![Course::new("c1", 100.0)];
//! assert_eq!(plan.total_cost(&catalog), 100.0);
//! assert_eq!(plan.cost_per_member(&catalog)[&person], 100.0);
//! ```

pub mod action;
pub mod course;
pub mod person;
pub mod plan;
pub mod selections;

#[cfg(test)]
mod tests;

pub use action::{PlanAction, ACTION_TYPES};
pub use course::Course;
pub use person::{normalize_name, Person};
pub use plan::{create_initial_plan_state, PlanState};
pub use selections::{CatalogSelections, Selections};
