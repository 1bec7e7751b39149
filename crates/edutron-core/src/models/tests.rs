#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;
    use serde_json::json;

    use crate::{
        constants::{DEFAULT_CATALOG, DEFAULT_PLAN_TITLE, DEFAULT_TEAM_NAMES},
        error::EdutronError,
        models::{create_initial_plan_state, Course, Person, PlanAction, PlanState, Selections},
    };

    fn create_test_plan() -> PlanState {
        let p1 = Person {
            id: "P1".to_string(),
            name: "Richard Hendricks".to_string(),
            email: None,
            role: None,
            team_id: Some("team-1".to_string()),
        };
        let p2 = Person {
            id: "P2".to_string(),
            name: "Monica Hall".to_string(),
            email: Some("monica@example.com".to_string()),
            role: Some("Investor".to_string()),
            team_id: Some("team-1".to_string()),
        };
        let p3 = Person {
            id: "P3".to_string(),
            name: "Jared Dunn".to_string(),
            email: None,
            role: None,
            team_id: Some("team-1".to_string()),
        };
        let selections = Selections::new()
            .with_course("P1", "cat", "c1")
            .with_course("P2", "cat", "c1")
            .with_course("P2", "cat", "c2");

        PlanState {
            id: "plan-test".to_string(),
            title: "Test Plan".to_string(),
            notes: String::new(),
            catalogs: vec!["cat".to_string()],
            teams: vec!["team-1".to_string()],
            team_members: vec![p1, p2, p3],
            selections,
            budget: None,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn catalog() -> Vec<Course> {
        vec![Course::new("c1", 100.0), Course::new("c2", 250.0)]
    }

    #[test]
    fn test_initial_plan_state_shape() {
        let plan = create_initial_plan_state();
        assert!(plan.id.starts_with("plan-"));
        assert_eq!(plan.title, DEFAULT_PLAN_TITLE);
        assert_eq!(plan.catalogs, vec![DEFAULT_CATALOG.to_string()]);
        assert_eq!(plan.teams.len(), 1);
        assert_eq!(plan.team_members.len(), 1);
        assert_eq!(plan.team_members[0].name, DEFAULT_TEAM_NAMES[0]);
        assert_eq!(plan.team_members[0].team_id.as_deref(), Some(plan.teams[0].as_str()));
        assert!(plan.selections.is_empty());
        assert_eq!(plan.budget, None);
        assert!(!plan.has_non_default_state());
    }

    #[test]
    fn test_initial_plan_ids_are_fresh() {
        let a = create_initial_plan_state();
        let b = create_initial_plan_state();
        assert_ne!(a.id, b.id);
        assert_ne!(a.teams[0], b.teams[0]);
        assert_ne!(a.team_members[0].id, b.team_members[0].id);
    }

    #[test]
    fn test_cost_aggregation() {
        let plan = create_test_plan();
        let courses = catalog();

        assert_eq!(plan.total_cost(&courses), 450.0);
        let costs = plan.cost_per_member(&courses);
        assert_eq!(costs["P1"], 100.0);
        assert_eq!(costs["P2"], 350.0);
        assert_eq!(costs["P3"], 0.0);
        assert_eq!(costs.len(), 3);
        assert_eq!(plan.selected_course_count(), 3);
    }

    #[test]
    fn test_unknown_courses_cost_nothing() {
        let mut plan = create_test_plan();
        plan.selections = plan.selections.with_course("P3", "cat", "ghost");

        let courses = catalog();
        assert_eq!(plan.total_cost(&courses), 450.0);
        assert_eq!(plan.cost_per_member(&courses)["P3"], 0.0);
        assert_eq!(plan.selected_course_count(), 4);
        assert_eq!(plan.total_cost(&[]), 0.0);
    }

    #[test]
    fn test_non_default_state_detection() {
        let fresh = create_initial_plan_state();

        let mut titled = fresh.clone();
        titled.title = "Q3 Enablement".to_string();
        assert!(titled.has_non_default_state());

        let mut noted = fresh.clone();
        noted.notes = "   ".to_string();
        assert!(!noted.has_non_default_state());
        noted.notes = "remember labs".to_string();
        assert!(noted.has_non_default_state());

        let mut budgeted = fresh.clone();
        budgeted.budget = Some(0.0);
        assert!(budgeted.has_non_default_state());

        let mut renamed = fresh;
        renamed.team_members[0].name = "Gilfoyle".to_string();
        assert!(renamed.has_non_default_state());
    }

    #[test]
    fn test_plan_state_wire_format() {
        let plan = create_test_plan();
        let value = serde_json::to_value(&plan).unwrap();

        assert_eq!(value["teamMembers"][1]["email"], "monica@example.com");
        assert_eq!(value["teamMembers"][0]["teamId"], "team-1");
        assert!(value["teamMembers"][0].get("email").is_none());
        assert_eq!(value["selections"]["P2"]["cat"], json!(["c1", "c2"]));
        assert_eq!(value["budget"], serde_json::Value::Null);
        assert_eq!(value["createdAt"], "2022-01-01T00:00:00Z");

        let back: PlanState = serde_json::from_value(value).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_course_reads_catalog_columns() {
        let course: Course = serde_json::from_value(json!({
            "ID": "c7",
            "Price": 1500,
            "Name": "Splunk Enterprise System Administration",
            "Category": "Admin",
            "Duration": 18,
            "Mode": "ILT",
            "Language": "English"
        }))
        .unwrap();
        assert_eq!(course.id, "c7");
        assert_eq!(course.price, 1500.0);
        assert_eq!(course.mode, "ILT");
    }

    #[test]
    fn test_action_wire_format() {
        let action = PlanAction::ToggleCourseSelection {
            person_id: "P1".to_string(),
            catalog_id: "cat".to_string(),
            course_id: "c1".to_string(),
            was_selected: false,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "TOGGLE_COURSE_SELECTION",
                "payload": {
                    "personId": "P1",
                    "catalogId": "cat",
                    "courseId": "c1",
                    "wasSelected": false
                }
            })
        );
        assert_eq!(PlanAction::from_value(value).unwrap(), action);

        let reset = serde_json::to_value(PlanAction::ResetSelections).unwrap();
        assert_eq!(reset, json!({"type": "RESET_SELECTIONS"}));
    }

    #[test]
    fn test_from_value_rejects_unknown_type() {
        let err = PlanAction::from_value(json!({"type": "LAUNCH_ROCKET", "payload": {}}))
            .unwrap_err();
        assert!(
            matches!(err, EdutronError::UnknownAction { ref action_type } if action_type == "LAUNCH_ROCKET")
        );

        let err = PlanAction::from_value(json!({"payload": {}})).unwrap_err();
        assert!(matches!(err, EdutronError::UnknownAction { .. }));
    }

    #[test]
    fn test_from_value_rejects_bad_payload() {
        let err = PlanAction::from_value(json!({
            "type": "SET_BUDGET",
            "payload": {"newBudget": "lots"}
        }))
        .unwrap_err();
        assert!(matches!(err, EdutronError::InvalidAction { ref action, .. } if action == "SET_BUDGET"));
    }

    #[test]
    fn test_import_with_null_state_parses_but_fails_validation() {
        let action = PlanAction::from_value(json!({
            "type": "IMPORT_PLAN",
            "payload": {"newPlanState": null}
        }))
        .unwrap();
        let err = action.validate(&create_test_plan()).unwrap_err();
        assert!(matches!(err, EdutronError::InvalidAction { .. }));
    }

    #[test]
    fn test_validate_member_indices() {
        let plan = create_test_plan();
        let stranger = Person::new("Stranger", None);

        let past_end = PlanAction::AddTeamMember {
            member: stranger.clone(),
            index: 4,
        };
        assert!(past_end.validate(&plan).is_err());

        let at_end = PlanAction::AddTeamMember {
            member: stranger.clone(),
            index: 3,
        };
        assert!(at_end.validate(&plan).is_ok());

        let duplicate_id = PlanAction::AddTeamMember {
            member: plan.team_members[0].clone(),
            index: 0,
        };
        assert!(duplicate_id.validate(&plan).is_err());

        let stale_remove = PlanAction::RemoveTeamMember {
            member: stranger,
            index: 0,
        };
        assert!(stale_remove.validate(&plan).is_err());

        let missing_update = PlanAction::UpdateTeamMember {
            index: 9,
            old_member: plan.team_members[0].clone(),
            new_member: plan.team_members[0].clone(),
        };
        assert!(missing_update.validate(&plan).is_err());
    }

    #[test]
    fn test_validate_budget() {
        let plan = create_test_plan();
        let negative = PlanAction::SetBudget {
            old_budget: None,
            new_budget: Some(-1.0),
        };
        assert!(negative.validate(&plan).is_err());

        let not_a_number = PlanAction::SetBudget {
            old_budget: None,
            new_budget: Some(f64::NAN),
        };
        assert!(not_a_number.validate(&plan).is_err());

        let cleared = PlanAction::SetBudget {
            old_budget: Some(10.0),
            new_budget: None,
        };
        assert!(cleared.validate(&plan).is_ok());
    }
}
