use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with --no-color and a database inside `dir`
fn edutron_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("edutron").expect("Failed to find edutron binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(dir.join("cli_test.db"))
        .current_dir(dir);
    cmd
}

/// Writes the two-course catalog used by the budget scenarios.
fn write_catalog(dir: &Path) -> String {
    let path = dir.join("catalog.json");
    fs::write(
        &path,
        r#"[
            {"ID": "c1", "Name": "Using Fields", "Price": 450},
            {"ID": "c2", "Name": "Creating Dashboards", "Price": 750}
        ]"#,
    )
    .expect("Failed to write catalog");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_show_default_plan() {
    let temp_dir = create_cli_test_environment();

    edutron_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# Pied Piper / Splunk Training Plan"))
        .stdout(predicate::str::contains("**Richard Hendricks**"))
        .stdout(predicate::str::contains("- **Budget**: not set"));
}

#[test]
fn test_cli_title_and_undo() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();

    edutron_cmd(dir)
        .args(["title", "Q3 Enablement"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Title set to \"Q3 Enablement\""));

    edutron_cmd(dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Q3 Enablement"));

    edutron_cmd(dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Undid: Changed title to \"Q3 Enablement\""));

    edutron_cmd(dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Pied Piper / Splunk Training Plan"));

    edutron_cmd(dir)
        .arg("redo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Redid: Changed title"));
}

#[test]
fn test_cli_blank_title_fails() {
    let temp_dir = create_cli_test_environment();

    edutron_cmd(temp_dir.path())
        .args(["title", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title cannot be empty"));
}

#[test]
fn test_cli_budget_scenario() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let catalog = write_catalog(dir);

    edutron_cmd(dir).arg("credits").assert().success();
    edutron_cmd(dir).args(["budget", "50"]).assert().success();
    edutron_cmd(dir)
        .args(["course", "toggle", "1", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected c1"));
    edutron_cmd(dir)
        .args(["course", "toggle", "1", "c2"])
        .assert()
        .success();

    edutron_cmd(dir)
        .args(["--catalog", &catalog, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Total cost**: $1,200"))
        .stdout(predicate::str::contains("- **Difference**: -$1,150"));

    edutron_cmd(dir).args(["budget", "50000"]).assert().success();
    edutron_cmd(dir)
        .args(["--catalog", &catalog, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Difference**: $48,800"));

    edutron_cmd(dir)
        .args(["budget", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget cleared"));
    edutron_cmd(dir)
        .args(["--catalog", &catalog, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Total cost**: $1,200"))
        .stdout(predicate::str::contains("Difference").not());
}

#[test]
fn test_cli_credits_display() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let catalog = write_catalog(dir);

    edutron_cmd(dir)
        .args(["course", "toggle", "1", "c2"])
        .assert()
        .success();
    edutron_cmd(dir)
        .args(["--catalog", &catalog, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Total cost**: 75 TU"));

    edutron_cmd(dir)
        .arg("credits")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing amounts in currency"));
    edutron_cmd(dir)
        .args(["--catalog", &catalog, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Total cost**: $750"));
}

#[test]
fn test_cli_members() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();

    edutron_cmd(dir)
        .args(["member", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Erlich Bachman"));
    edutron_cmd(dir)
        .args(["member", "add", "Monica Hall"])
        .assert()
        .success();
    edutron_cmd(dir)
        .args(["member", "add", "monica hall"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    edutron_cmd(dir)
        .args(["member", "rename", "2", "Erlich"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 2 renamed to Erlich"));
    edutron_cmd(dir)
        .args(["member", "remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Richard Hendricks"));

    edutron_cmd(dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Team (2 members)"))
        .stdout(predicate::str::contains("1. **Erlich**"))
        .stdout(predicate::str::contains("2. **Monica Hall**"));

    edutron_cmd(dir)
        .args(["member", "remove", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Roster positions start at 1"));
}

#[test]
fn test_cli_history_listing() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();

    edutron_cmd(dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded."));

    edutron_cmd(dir).args(["notes", "Bring laptops"]).assert().success();
    edutron_cmd(dir).arg("reset").assert().success();
    edutron_cmd(dir).arg("undo").assert().success();

    edutron_cmd(dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Undo**: 1 of 100 entries"))
        .stdout(predicate::str::contains("1. Updated notes"))
        .stdout(predicate::str::contains("1. Reset all course selections"));
}

#[test]
fn test_cli_nothing_to_undo() {
    let temp_dir = create_cli_test_environment();

    edutron_cmd(temp_dir.path())
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo"));
}

#[test]
fn test_cli_export_and_import() {
    let source_dir = create_cli_test_environment();
    let target_dir = create_cli_test_environment();
    let catalog = write_catalog(target_dir.path());
    let export_path = source_dir.path().join("plan.json");

    edutron_cmd(source_dir.path())
        .args(["title", "Shared Plan"])
        .assert()
        .success();
    edutron_cmd(source_dir.path())
        .args(["course", "toggle", "1", "c1"])
        .assert()
        .success();
    edutron_cmd(source_dir.path())
        .args(["course", "toggle", "1", "X1"])
        .assert()
        .success();
    edutron_cmd(source_dir.path())
        .args(["export", "--output", export_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported plan to"));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(exported["plan"]["title"], "Shared Plan");
    assert!(exported["metadata"]["id"].as_str().unwrap().starts_with("export-"));

    edutron_cmd(target_dir.path())
        .args(["--catalog", &catalog, "import", export_path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("- `X1`"))
        .stderr(predicate::str::contains("--drop-missing"));

    edutron_cmd(target_dir.path())
        .args([
            "--catalog",
            &catalog,
            "import",
            export_path.to_str().unwrap(),
            "--drop-missing",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported \"Shared Plan\""));

    edutron_cmd(target_dir.path())
        .args(["--catalog", &catalog, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Shared Plan"))
        .stdout(predicate::str::contains("1 courses"));
}

#[test]
fn test_cli_import_invalid_document() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let path = dir.join("broken.json");
    fs::write(&path, r#"{"metadata": {"id": ""}}"#).unwrap();

    edutron_cmd(dir)
        .args(["import", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("## Import failed"))
        .stdout(predicate::str::contains(
            "- metadata.id: String must contain at least 1 character(s)",
        ))
        .stdout(predicate::str::contains("- plan: Required"));
}

#[test]
fn test_cli_export_default_filename() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();

    edutron_cmd(dir)
        .args(["title", "Team Plan"])
        .assert()
        .success();
    edutron_cmd(dir).arg("export").assert().success();

    let exported: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
        .filter(|name| name.starts_with("edutron_"))
        .collect();
    assert_eq!(exported.len(), 1);
    assert!(exported[0].ends_with("_team-plan.json"));
}

#[test]
fn test_cli_new_plan_is_undoable() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();

    edutron_cmd(dir).args(["title", "Old Plan"]).assert().success();
    edutron_cmd(dir)
        .arg("new")
        .assert()
        .success()
        .stdout(predicate::str::contains("Started new plan plan-"));
    edutron_cmd(dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Pied Piper / Splunk Training Plan"));
    edutron_cmd(dir).arg("undo").assert().success();
    edutron_cmd(dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Old Plan"));
}
