//! Structural validation of imported plan documents.
//!
//! Every violation is collected rather than stopping at the first one. Each
//! message reads `<dotted.path>: <problem>`, with array positions as path
//! segments (`plan.teamMembers.0.name: Required`).

use std::collections::HashSet;

use jiff::Timestamp;
use serde_json::{Map, Value};

use crate::models::normalize_name;

/// Checks `document` against the plan document schema and returns one
/// message per violation. An empty list means the shape is acceptable.
pub fn validate_structure(document: &Value) -> Vec<String> {
    let mut checker = Checker::default();
    let Some(root) = checker.object(document, "document") else {
        return checker.errors;
    };

    if let Some(metadata) = checker.required_object(root, "", "metadata") {
        for key in ["id", "appVersion", "exportedAt"] {
            checker.non_empty_string(metadata, "metadata", key);
        }
    }

    if let Some(plan) = checker.required_object(root, "", "plan") {
        checker.plan(plan);
    }

    for key in ["metrics", "totals"] {
        match root.get(key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                if let Some(metrics) = checker.object(value, key) {
                    checker.metrics(metrics, key);
                }
            }
        }
    }

    checker.errors
}

#[derive(Default)]
struct Checker {
    errors: Vec<String>,
}

impl Checker {
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(format!("{path}: {}", message.into()));
    }

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.fail(path, expected("object", other));
                None
            }
        }
    }

    fn required<'v>(
        &mut self,
        parent: &'v Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<&'v Value> {
        let value = parent.get(key);
        if value.is_none() {
            self.fail(&join(prefix, key), "Required");
        }
        value
    }

    fn required_object<'v>(
        &mut self,
        parent: &'v Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<&'v Map<String, Value>> {
        let value = self.required(parent, prefix, key)?;
        self.object(value, &join(prefix, key))
    }

    fn non_empty_string<'v>(
        &mut self,
        parent: &'v Map<String, Value>,
        prefix: &str,
        key: &str,
    ) -> Option<&'v str> {
        let path = join(prefix, key);
        match self.required(parent, prefix, key)? {
            Value::String(s) if s.is_empty() => {
                self.fail(&path, "String must contain at least 1 character(s)");
                None
            }
            Value::String(s) => Some(s),
            other => {
                self.fail(&path, expected("string", other));
                None
            }
        }
    }

    fn optional_string(&mut self, parent: &Map<String, Value>, prefix: &str, key: &str) {
        match parent.get(key) {
            None | Some(Value::String(_)) => {}
            Some(other) => self.fail(&join(prefix, key), expected("string", other)),
        }
    }

    fn timestamp(&mut self, parent: &Map<String, Value>, prefix: &str, key: &str) {
        if let Some(raw) = self.non_empty_string(parent, prefix, key) {
            if raw.parse::<Timestamp>().is_err() {
                self.fail(&join(prefix, key), "Invalid datetime");
            }
        }
    }

    fn string_list(&mut self, parent: &Map<String, Value>, prefix: &str, key: &str) {
        let path = join(prefix, key);
        let Some(value) = self.required(parent, prefix, key) else {
            return;
        };
        let Value::Array(items) = value else {
            self.fail(&path, expected("array", value));
            return;
        };
        if items.is_empty() {
            self.fail(&path, "Array must contain at least 1 element(s)");
        }
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                self.fail(&format!("{path}.{i}"), expected("string", item));
            }
        }
    }

    fn plan(&mut self, plan: &Map<String, Value>) {
        let prefix = "plan";
        self.non_empty_string(plan, prefix, "id");
        self.non_empty_string(plan, prefix, "title");
        self.optional_string(plan, prefix, "notes");
        self.string_list(plan, prefix, "catalogs");
        self.string_list(plan, prefix, "teams");
        self.timestamp(plan, prefix, "createdAt");
        self.timestamp(plan, prefix, "updatedAt");

        match self.required(plan, prefix, "budget") {
            None | Some(Value::Null | Value::Number(_)) => {}
            Some(other) => self.fail("plan.budget", expected("number", other)),
        }

        self.team_members(plan);
        self.selections(plan);
    }

    fn team_members(&mut self, plan: &Map<String, Value>) {
        let path = "plan.teamMembers";
        let Some(value) = self.required(plan, "plan", "teamMembers") else {
            return;
        };
        let Value::Array(members) = value else {
            self.fail(path, expected("array", value));
            return;
        };
        if members.is_empty() {
            self.fail(path, "Array must contain at least 1 element(s)");
        }
        let mut names = HashSet::new();
        for (i, member) in members.iter().enumerate() {
            let member_path = format!("{path}.{i}");
            let Some(member) = self.object(member, &member_path) else {
                continue;
            };
            self.non_empty_string(member, &member_path, "id");
            if let Some(name) = self.non_empty_string(member, &member_path, "name") {
                let name_path = format!("{member_path}.name");
                let normalized = normalize_name(name);
                if normalized.is_empty() {
                    self.fail(&name_path, "Name cannot be blank");
                } else if !names.insert(normalized) {
                    let message = format!("Duplicate team member name \"{}\"", name.trim());
                    self.fail(&name_path, message);
                }
            }
            self.optional_string(member, &member_path, "email");
            self.optional_string(member, &member_path, "role");
            if member.contains_key("teamId") {
                self.non_empty_string(member, &member_path, "teamId");
            }
        }
    }

    fn selections(&mut self, plan: &Map<String, Value>) {
        let path = "plan.selections";
        let Some(people) = self.required_object(plan, "plan", "selections") else {
            return;
        };
        for (person_id, catalogs) in people {
            let person_path = format!("{path}.{person_id}");
            let Some(catalogs) = self.object(catalogs, &person_path) else {
                continue;
            };
            for (catalog_id, courses) in catalogs {
                let catalog_path = format!("{person_path}.{catalog_id}");
                let Value::Array(courses) = courses else {
                    self.fail(&catalog_path, expected("array", courses));
                    continue;
                };
                for (i, course) in courses.iter().enumerate() {
                    if !course.is_string() {
                        self.fail(&format!("{catalog_path}.{i}"), expected("string", course));
                    }
                }
            }
        }
    }

    fn metrics(&mut self, metrics: &Map<String, Value>, prefix: &str) {
        for key in ["selections", "totalCost"] {
            if let Some(value) = self.required(metrics, prefix, key) {
                self.non_negative(value, &join(prefix, key));
            }
        }
        for key in ["catalogs", "courses", "teamMembers", "teams"] {
            if let Some(value) = metrics.get(key) {
                self.non_negative(value, &join(prefix, key));
            }
        }

        let path = join(prefix, "costPerMember");
        let Some(value) = self.required(metrics, prefix, "costPerMember") else {
            return;
        };
        let Some(costs) = self.object(value, &path) else {
            return;
        };
        for (person_id, cost) in costs {
            if !cost.is_number() {
                self.fail(&format!("{path}.{person_id}"), expected("number", cost));
            }
        }
    }

    fn non_negative(&mut self, value: &Value, path: &str) {
        match value.as_f64() {
            Some(n) if n < 0.0 => {
                self.fail(path, "Number must be greater than or equal to 0");
            }
            Some(_) => {}
            None => self.fail(path, expected("number", value)),
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn expected(kind: &str, received: &Value) -> String {
    format!("Expected {kind}, received {}", type_name(received))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
