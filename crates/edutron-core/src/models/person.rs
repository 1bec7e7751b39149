//! Team member model.

use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

/// A member of the team a plan is built for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique generated identifier (`person-...`)
    pub id: String,

    /// Display name, unique within a plan after trimming and lowercasing
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Team this person belongs to in the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl Person {
    /// Creates a member with a fresh id.
    pub fn new(name: impl Into<String>, team_id: Option<String>) -> Self {
        Self {
            id: generate_id("person"),
            name: name.into(),
            email: None,
            role: None,
            team_id,
        }
    }

    /// Name form used for uniqueness checks.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Trims and lowercases a member name for comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
