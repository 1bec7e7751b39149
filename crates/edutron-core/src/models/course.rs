//! Catalog course records.

use serde::{Deserialize, Serialize};

/// A course offered by a catalog.
///
/// Courses are owned by the catalog loader and only read here; the engine
/// itself looks at nothing but [`Course::id`] and [`Course::price`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Course {
    /// Identifier, unique within its catalog
    #[serde(rename = "ID")]
    pub id: String,

    /// Price in base currency
    pub price: f64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: String,

    /// Duration in hours
    #[serde(default)]
    pub duration: f64,

    /// Delivery mode code (E, EWL, ILT, X)
    #[serde(default)]
    pub mode: String,

    #[serde(default)]
    pub language: String,
}

impl Course {
    /// Creates a course with only the fields the engine needs.
    pub fn new(id: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            price,
            name: String::new(),
            category: String::new(),
            duration: 0.0,
            mode: String::new(),
            language: String::new(),
        }
    }
}
