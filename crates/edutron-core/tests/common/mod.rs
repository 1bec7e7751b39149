#![allow(dead_code)]

use std::path::{Path, PathBuf};

use edutron_core::{models::Course, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Creates a temporary directory and a database path inside it.
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("edutron.db");
    (temp_dir, db_path)
}

/// Opens a file-backed planner at `db_path`.
pub fn open_planner(db_path: &Path) -> Planner {
    PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .expect("Failed to create planner")
}

/// Creates a planner that keeps nothing on disk.
pub fn create_memory_planner() -> Planner {
    PlannerBuilder::new()
        .in_memory()
        .build()
        .expect("Failed to create planner")
}

/// Catalog used by the budget scenarios: two courses worth 1200 together.
pub fn sample_courses() -> Vec<Course> {
    vec![
        Course {
            name: "Using Fields".to_string(),
            category: "Search".to_string(),
            ..Course::new("c1", 450.0)
        },
        Course {
            name: "Creating Dashboards".to_string(),
            category: "Visualization".to_string(),
            ..Course::new("c2", 750.0)
        },
    ]
}
