//! Display wrappers for plans, history and import results.
//!
//! Domain models implement [`std::fmt::Display`] directly where a single
//! rendering makes sense (a [`PlanAction`](crate::models::PlanAction) reads
//! as a one-line description). Views that need context beyond the model,
//! such as the catalog prices or the active display unit, are wrapper types
//! in this module.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (PlanState,     │───▶│ (PlanOverview,  │───▶│     Output      │
//! │  PlanAction)    │    │  HistoryOverview)│    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every formatter produces markdown for the terminal renderer.
//!
//! ```rust
//! use edutron_core::{
//!     calculator::CostCalculator,
//!     display::{OperationStatus, PlanOverview},
//!     models::{create_initial_plan_state, Course},
//! };
//!
//! let plan = create_initial_plan_state();
//! let courses = vec![Course::new("c1", 100.0)];
//! let overview = PlanOverview::new(&plan, &courses, CostCalculator::default());
//! assert!(overview.to_string().starts_with("# Pied Piper / Splunk Training Plan"));
//!
//! let status = OperationStatus::success("Budget cleared".to_string());
//! assert_eq!(status.to_string(), "Success: Budget cleared\n");
//! ```

pub mod datetime;
pub mod models;
pub mod overview;
pub mod status;

pub use datetime::LocalDateTime;
pub use overview::{HistoryOverview, ImportReport, PlanOverview};
pub use status::OperationStatus;
