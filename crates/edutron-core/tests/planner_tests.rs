mod common;

use common::{create_memory_planner, create_test_environment, open_planner, sample_courses};
use edutron_core::{
    calculator::CostCalculator,
    db::{Database, PLAN_HISTORY_KEY},
    EdutronError, PlanAction,
};
use serde_json::json;

const CATALOG: &str = "splunk-step";

#[test]
fn test_budget_deficit_and_surplus() {
    let mut planner = create_memory_planner();
    let courses = sample_courses();
    let person = planner.plan().team_members[0].id.clone();

    planner.set_budget(Some(50.0)).unwrap();
    planner.toggle_course(&person, CATALOG, "c1").unwrap();
    planner.toggle_course(&person, CATALOG, "c2").unwrap();
    assert_eq!(planner.total_cost(&courses), 1200.0);
    assert_eq!(planner.budget_difference(&courses), Some(-1150.0));

    planner.set_budget(Some(50000.0)).unwrap();
    assert_eq!(planner.budget_difference(&courses), Some(48800.0));

    planner.set_budget(None).unwrap();
    assert_eq!(planner.budget_difference(&courses), None);
    assert_eq!(planner.total_cost(&courses), 1200.0);
}

#[test]
fn test_currency_toggle_round_trip() {
    let mut planner = create_memory_planner();
    let courses = sample_courses();
    let person = planner.plan().team_members[0].id.clone();
    planner.toggle_course(&person, CATALOG, "c1").unwrap();
    planner.toggle_course(&person, CATALOG, "c2").unwrap();

    let total = planner.total_cost(&courses);
    let credits = planner.calculator().display_amount(total);
    assert_eq!(credits, 120.0);

    planner.toggle_credits_mode().unwrap();
    let usd = planner.calculator().display_amount(total);
    assert_eq!(usd, credits * 10.0);

    planner.toggle_credits_mode().unwrap();
    assert_eq!(planner.calculator().display_amount(total), credits);
    assert_eq!(planner.calculator(), CostCalculator::default());
}

#[test]
fn test_cost_per_member_includes_idle_members() {
    let mut planner = create_memory_planner();
    let courses = vec![
        edutron_core::Course::new("c1", 100.0),
        edutron_core::Course::new("c2", 250.0),
    ];
    let p1 = planner.plan().team_members[0].id.clone();
    let p2 = planner.add_team_member(None).unwrap().id;
    let p3 = planner.add_team_member(None).unwrap().id;

    planner.toggle_course(&p1, CATALOG, "c1").unwrap();
    planner.toggle_course(&p2, CATALOG, "c1").unwrap();
    planner.toggle_course(&p2, CATALOG, "c2").unwrap();

    let costs = planner.plan().cost_per_member(&courses);
    assert_eq!(planner.total_cost(&courses), 450.0);
    assert_eq!(costs[&p1], 100.0);
    assert_eq!(costs[&p2], 350.0);
    assert_eq!(costs[&p3], 0.0);
}

#[test]
fn test_undo_all_then_redo_all() {
    let mut planner = create_memory_planner();
    let initial = planner.plan().clone();
    let person = initial.team_members[0].id.clone();

    planner.update_title("Round trip").unwrap();
    let member = planner.add_team_member(Some("Gavin Belson")).unwrap();
    planner.toggle_course(&member.id, CATALOG, "c2").unwrap();
    planner.toggle_course(&person, CATALOG, "c1").unwrap();
    planner.set_budget(Some(900.0)).unwrap();
    planner.reset_selections().unwrap();
    planner.rename_team_member(1, "Hooli Gavin").unwrap();
    planner.remove_team_member(0).unwrap();
    let after = planner.plan().clone();

    let mut undone = 0;
    while planner.undo().unwrap() {
        undone += 1;
    }
    assert_eq!(undone, 8);
    let mut restored = planner.plan().clone();
    restored.updated_at = initial.updated_at;
    assert_eq!(restored, initial);

    while planner.redo().unwrap() {}
    let mut replayed = planner.plan().clone();
    replayed.updated_at = after.updated_at;
    assert_eq!(replayed, after);
}

#[test]
fn test_new_action_discards_redo() {
    let mut planner = create_memory_planner();
    planner.update_title("A").unwrap();
    planner.update_title("B").unwrap();
    planner.undo().unwrap();
    assert!(planner.can_redo());

    planner.update_notes("C").unwrap();
    assert!(!planner.can_redo());
    assert_eq!(planner.plan().title, "A");
}

#[test]
fn test_import_with_missing_courses() {
    let mut source = create_memory_planner();
    let person = source.plan().team_members[0].id.clone();
    source.toggle_course(&person, CATALOG, "c1").unwrap();
    source.toggle_course(&person, CATALOG, "X1").unwrap();
    source.update_title("Imported").unwrap();
    let document = serde_json::to_value(source.export(&sample_courses())).unwrap();

    let mut planner = create_memory_planner();
    let result = edutron_core::import_export::validate_import(&document, &sample_courses());
    assert!(result.is_valid);
    assert_eq!(result.missing_courses, vec!["X1".to_string()]);

    let refused = planner.apply_import(result.clone(), false).unwrap_err();
    assert!(matches!(refused, EdutronError::InvalidInput { .. }));
    assert!(!planner.can_undo());

    planner.apply_import(result, true).unwrap();
    assert_eq!(planner.plan().title, "Imported");
    assert!(planner.plan().selections.contains(&person, CATALOG, "c1"));
    assert!(!planner.plan().selections.contains(&person, CATALOG, "X1"));

    planner.undo().unwrap();
    assert_ne!(planner.plan().title, "Imported");
}

#[test]
fn test_persisted_history_with_unknown_actions() {
    let (_temp_dir, db_path) = create_test_environment();
    {
        let mut planner = open_planner(&db_path);
        planner.update_title("One").unwrap();
        planner.update_title("Two").unwrap();
    }

    {
        let mut db = Database::new(&db_path).unwrap();
        let mut history = db.load_value(PLAN_HISTORY_KEY).unwrap().unwrap();
        history["undoStack"]
            .as_array_mut()
            .unwrap()
            .push(json!({"type": "FROM_THE_FUTURE", "payload": {}}));
        db.save_document(PLAN_HISTORY_KEY, &history).unwrap();
    }

    let mut planner = open_planner(&db_path);
    assert_eq!(planner.history().undo_stack().len(), 2);
    assert!(matches!(
        planner.history().undo_stack()[1],
        PlanAction::UpdateTitle { ref new_title, .. } if new_title == "Two"
    ));

    planner.undo().unwrap();
    assert_eq!(planner.plan().title, "One");
}

#[test]
fn test_unreadable_history_is_discarded() {
    let (_temp_dir, db_path) = create_test_environment();
    {
        let mut planner = open_planner(&db_path);
        planner.update_title("Kept").unwrap();
    }
    {
        let mut db = Database::new(&db_path).unwrap();
        db.save_document(PLAN_HISTORY_KEY, &json!("garbage")).unwrap();
    }

    let planner = open_planner(&db_path);
    assert_eq!(planner.plan().title, "Kept");
    assert!(!planner.can_undo());
}
