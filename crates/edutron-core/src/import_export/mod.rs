//! Plan documents: export, file naming and import validation.
//!
//! An exported plan is a JSON document of the form
//!
//! ```text
//! {
//!   "metadata": { "id", "appVersion", "exportedAt" },
//!   "plan":     PlanState,
//!   "metrics":  { "catalogs", "courses", "selections", "teamMembers",
//!                 "teams", "totalCost", "costPerMember" }
//! }
//! ```
//!
//! Older documents carry the metrics under `totals`; both keys are read the
//! same way. Importing happens in two stages. [`validate_import`] checks the
//! document shape and reports every violation at once, then cross-references
//! the selected course ids against the live catalog. Courses that cannot be
//! resolved are reported, not rejected; the caller decides whether to cancel
//! or to drop them with [`filter_missing_courses`].

use std::collections::{BTreeMap, HashSet};

use jiff::{Timestamp, Zoned};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    constants::APP_VERSION,
    error::{EdutronError, Result},
    models::{Course, PlanState, Selections},
};

mod validate;


pub use validate::validate_structure;

/// Identity of one export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    /// `export-<unix millis>`
    pub id: String,
    pub app_version: String,
    /// RFC 3339 time of the export
    pub exported_at: String,
}

/// Summary figures stored alongside an exported plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetrics {
    #[serde(default)]
    pub catalogs: usize,
    /// Courses available in the catalog at export time
    #[serde(default)]
    pub courses: usize,
    /// Number of selections across every member
    pub selections: usize,
    #[serde(default)]
    pub team_members: usize,
    #[serde(default)]
    pub teams: usize,
    pub total_cost: f64,
    pub cost_per_member: BTreeMap<String, f64>,
}

/// A complete exported plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDocument {
    pub metadata: PlanMetadata,
    pub plan: PlanState,
    #[serde(default, alias = "totals", skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PlanMetrics>,
}

/// Outcome of [`validate_import`].
#[derive(Debug, Clone, Default)]
pub struct ImportValidation {
    /// True when the document shape is acceptable. Missing courses do not
    /// affect this flag.
    pub is_valid: bool,
    /// The parsed document, with its selections normalised
    pub document: Option<PlanDocument>,
    /// One `"<path>: <message>"` entry per violation
    pub errors: Vec<String>,
    /// Selected course ids absent from the live catalog, deduplicated
    pub missing_courses: Vec<String>,
}

impl ImportValidation {
    fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            document: None,
            errors,
            missing_courses: Vec::new(),
        }
    }

    /// Whether the document is valid and every course resolves.
    pub fn is_clean(&self) -> bool {
        self.is_valid && self.missing_courses.is_empty()
    }

    /// Converts the result into the plan to import.
    ///
    /// Invalid documents yield [`EdutronError::ImportInvalid`]. When courses
    /// are missing, `drop_missing` strips them from the selections;
    /// otherwise the import is refused.
    pub fn into_plan(self, drop_missing: bool) -> Result<PlanState> {
        let document = match self.document {
            Some(document) if self.is_valid => document,
            _ => return Err(EdutronError::ImportInvalid { errors: self.errors }),
        };

        let mut plan = document.plan;
        if !self.missing_courses.is_empty() {
            if !drop_missing {
                return Err(EdutronError::invalid_input("import")
                    .with_reason(format!(
                        "plan references courses missing from the catalog: {}",
                        self.missing_courses.join(", ")
                    )));
            }
            plan.selections = filter_missing_courses(&plan.selections, &self.missing_courses);
            debug!(
                "Dropped {} missing courses from imported selections",
                self.missing_courses.len()
            );
        }
        Ok(plan)
    }
}

/// Computes the metrics block for `plan` against the live catalog.
pub fn calculate_metrics(plan: &PlanState, courses: &[Course]) -> PlanMetrics {
    PlanMetrics {
        catalogs: plan.catalogs.len(),
        courses: courses.len(),
        selections: plan.selected_course_count(),
        team_members: plan.team_members.len(),
        teams: plan.teams.len(),
        total_cost: plan.total_cost(courses),
        cost_per_member: plan.cost_per_member(courses),
    }
}

/// Builds the export document for `plan` as of `now`.
pub fn build_export(plan: &PlanState, courses: &[Course], now: Timestamp) -> PlanDocument {
    PlanDocument {
        metadata: PlanMetadata {
            id: format!("export-{}", now.as_millisecond()),
            app_version: APP_VERSION.to_string(),
            exported_at: now.to_string(),
        },
        plan: plan.clone(),
        metrics: Some(calculate_metrics(plan, courses)),
    }
}

/// File name for an export taken at `local_time`:
/// `edutron_<YYYY-MM-DD>T<HH-MM>_<slug>.json`.
///
/// ```rust
/// use edutron_core::import_export::export_filename;
///
/// let at: jiff::Zoned = "2024-03-05T09:07:00[UTC]".parse().unwrap();
/// assert_eq!(
///     export_filename("Pied Piper / Splunk Training Plan", &at),
///     "edutron_2024-03-05T09-07_pied-piper-splunk-training-plan.json"
/// );
/// ```
pub fn export_filename(title: &str, local_time: &Zoned) -> String {
    let stamp = local_time.strftime("%Y-%m-%dT%H-%M");
    let mut slug = slugify(title);
    if slug.is_empty() {
        slug.push_str("plan");
    }
    format!("edutron_{stamp}_{slug}.json")
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Parses the text of an import file.
pub fn parse_import(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| EdutronError::ImportInvalid {
        errors: vec![format!("Invalid JSON file: {e}")],
    })
}

/// Validates a raw document against the plan schema and the live catalog.
pub fn validate_import(value: &Value, courses: &[Course]) -> ImportValidation {
    let errors = validate_structure(value);
    if !errors.is_empty() {
        debug!("Import rejected with {} validation errors", errors.len());
        return ImportValidation::invalid(errors);
    }

    let mut value = value.clone();
    if let Some(object) = value.as_object_mut() {
        // `metrics` wins over the legacy key when a document has both.
        if object.contains_key("metrics") {
            object.remove("totals");
        }
    }

    let mut document: PlanDocument = match serde_json::from_value(value) {
        Ok(document) => document,
        Err(e) => return ImportValidation::invalid(vec![format!("document: {e}")]),
    };
    document.plan.selections = document.plan.selections.normalized();

    let missing_courses = find_missing_courses(&document.plan.selections, courses);
    if !missing_courses.is_empty() {
        warn!(
            "Imported plan references {} unknown courses: {}",
            missing_courses.len(),
            missing_courses.join(", ")
        );
    }

    ImportValidation {
        is_valid: true,
        document: Some(document),
        errors: Vec::new(),
        missing_courses,
    }
}

/// Course ids referenced in `selections` that are absent from `courses`,
/// each reported once in order of first appearance.
pub fn find_missing_courses(selections: &Selections, courses: &[Course]) -> Vec<String> {
    let available: HashSet<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    let mut seen = HashSet::new();
    selections
        .course_ids()
        .filter(|id| !available.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Removes every course in `missing` from `selections`, pruning people and
/// catalogs left without courses.
pub fn filter_missing_courses(selections: &Selections, missing: &[String]) -> Selections {
    let missing: HashSet<&str> = missing.iter().map(String::as_str).collect();
    selections.without_courses(&missing)
}
