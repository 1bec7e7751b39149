//! Course catalog loading.
//!
//! A catalog file is a JSON array of course records as published by the
//! training catalog export (`ID`, `Name`, `Category`, `Price`, ...). Only
//! `ID` and `Price` are required.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use edutron_core::models::Course;
use log::{debug, warn};

/// Reads the catalog at `path`. Later duplicates of an id are dropped.
pub fn load_catalog(path: &Path) -> Result<Vec<Course>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let courses: Vec<Course> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(courses.len());
    for course in courses {
        if !course.price.is_finite() || course.price < 0.0 {
            bail!("Course {} has an invalid price {}", course.id, course.price);
        }
        if seen.insert(course.id.clone()) {
            unique.push(course);
        } else {
            warn!("Skipping duplicate course id {}", course.id);
        }
    }

    debug!("Loaded {} courses from {}", unique.len(), path.display());
    Ok(unique)
}
