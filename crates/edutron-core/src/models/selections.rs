//! Selection index: which courses each person has picked, per catalog.
//!
//! The index is a nested mapping `person -> catalog -> [course]`. Two
//! invariants hold for every value produced by this module:
//!
//! - a catalog key is present only while its course list is non-empty;
//! - a person key is present only while it has at least one catalog key.
//!
//! All operations are pure: they take `&self` and return a new index.
//! Missing intermediate keys are treated as empty, never as errors.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Course ids selected in one catalog.
pub type CatalogSelections = BTreeMap<String, Vec<String>>;

/// Course selections keyed by person id, then catalog id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Selections(BTreeMap<String, CatalogSelections>);

impl Selections {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an index with `course_id` selected for the person in the
    /// catalog. Selecting an already selected course returns an equal index.
    pub fn with_course(&self, person_id: &str, catalog_id: &str, course_id: &str) -> Self {
        if self.contains(person_id, catalog_id, course_id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.0
            .entry(person_id.to_string())
            .or_default()
            .entry(catalog_id.to_string())
            .or_default()
            .push(course_id.to_string());
        next
    }

    /// Returns an index without `course_id` for the person in the catalog,
    /// pruning the catalog and person keys when they become empty.
    pub fn without_course(&self, person_id: &str, catalog_id: &str, course_id: &str) -> Self {
        let mut next = self.clone();
        let Some(catalogs) = next.0.get_mut(person_id) else {
            return next;
        };
        if let Some(courses) = catalogs.get_mut(catalog_id) {
            courses.retain(|id| id != course_id);
            if courses.is_empty() {
                catalogs.remove(catalog_id);
            }
        }
        if catalogs.is_empty() {
            next.0.remove(person_id);
        }
        next
    }

    /// Membership test; false whenever an intermediate key is missing.
    pub fn contains(&self, person_id: &str, catalog_id: &str, course_id: &str) -> bool {
        self.0
            .get(person_id)
            .and_then(|catalogs| catalogs.get(catalog_id))
            .is_some_and(|courses| courses.iter().any(|id| id == course_id))
    }

    /// Returns an index without any entry for the person.
    pub fn without_person(&self, person_id: &str) -> Self {
        let mut next = self.clone();
        next.0.remove(person_id);
        next
    }

    /// Returns an index with every course id in `missing` removed, pruning
    /// empty branches.
    pub fn without_courses(&self, missing: &HashSet<&str>) -> Self {
        self.retain(|course_id| !missing.contains(course_id))
    }

    /// Collapses duplicate course ids and drops empty branches. Used on
    /// documents that did not come out of this module.
    pub fn normalized(&self) -> Self {
        self.retain(|_| true)
    }

    fn retain(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        let mut out = BTreeMap::new();
        for (person_id, catalogs) in &self.0 {
            let mut kept_catalogs = CatalogSelections::new();
            for (catalog_id, courses) in catalogs {
                let mut seen = HashSet::new();
                let kept: Vec<String> = courses
                    .iter()
                    .filter(|id| keep(id.as_str()) && seen.insert(id.as_str()))
                    .cloned()
                    .collect();
                if !kept.is_empty() {
                    kept_catalogs.insert(catalog_id.clone(), kept);
                }
            }
            if !kept_catalogs.is_empty() {
                out.insert(person_id.clone(), kept_catalogs);
            }
        }
        Self(out)
    }

    /// Selections of a single person, if any.
    pub fn for_person(&self, person_id: &str) -> Option<&CatalogSelections> {
        self.0.get(person_id)
    }

    /// Iterates over `(person_id, catalog selections)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CatalogSelections)> {
        self.0.iter()
    }

    /// Iterates over every selected course id, duplicates across people or
    /// catalogs included.
    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .values()
            .flat_map(|catalogs| catalogs.values())
            .flatten()
            .map(String::as_str)
    }

    /// Total number of selections.
    pub fn len(&self) -> usize {
        self.course_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, CatalogSelections>> for Selections {
    fn from(map: BTreeMap<String, CatalogSelections>) -> Self {
        Self(map)
    }
}
