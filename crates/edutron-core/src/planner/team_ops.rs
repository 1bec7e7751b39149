//! Roster operations for the Planner.
//!
//! Names are checked here, before an action is built, so the plan never
//! holds a blank name or two members whose names differ only in case or
//! surrounding whitespace.

use std::collections::HashSet;

use super::Planner;
use crate::{
    constants::{DEFAULT_TEAM_NAMES, MAX_TEAM_MEMBERS},
    error::{EdutronError, Result},
    models::{normalize_name, PlanAction, Person},
};

impl Planner {
    /// Appends a member to the roster.
    ///
    /// Without a name the first unused default name is taken, falling back
    /// to `Team Member N`. The member joins the plan's first team.
    pub fn add_team_member(&mut self, name: Option<&str>) -> Result<Person> {
        let members = &self.plan().team_members;
        if members.len() >= MAX_TEAM_MEMBERS {
            return Err(EdutronError::invalid_input("team_members")
                .with_reason(format!("Maximum {MAX_TEAM_MEMBERS} members allowed")));
        }

        let name = match name {
            Some(name) => self.checked_name(name, None)?,
            None => self.next_default_name(),
        };
        let member = Person::new(name, self.plan().teams.first().cloned());
        let index = self.plan().team_members.len();

        self.dispatch(PlanAction::AddTeamMember {
            member: member.clone(),
            index,
        })?;
        Ok(member)
    }

    /// Renames the member at `index`. Returns false, recording nothing,
    /// when the trimmed name equals the current one.
    pub fn rename_team_member(&mut self, index: usize, name: &str) -> Result<bool> {
        let old_member = self.member_at(index)?.clone();
        let name = self.checked_name(name, Some(index))?;
        if name == old_member.name {
            return Ok(false);
        }

        let new_member = Person {
            name,
            ..old_member.clone()
        };
        self.dispatch(PlanAction::UpdateTeamMember {
            index,
            old_member,
            new_member,
        })?;
        Ok(true)
    }

    /// Removes the member at `index` together with their selections. The
    /// last remaining member cannot be removed.
    pub fn remove_team_member(&mut self, index: usize) -> Result<Person> {
        if self.plan().team_members.len() <= 1 {
            return Err(EdutronError::invalid_input("team_members")
                .with_reason("Cannot delete the last team member"));
        }
        let member = self.member_at(index)?.clone();

        self.dispatch(PlanAction::RemoveTeamMember {
            member: member.clone(),
            index,
        })?;
        Ok(member)
    }

    fn member_at(&self, index: usize) -> Result<&Person> {
        self.plan().team_members.get(index).ok_or_else(|| {
            EdutronError::invalid_input("index").with_reason(format!(
                "no team member at position {index} (roster has {})",
                self.plan().team_members.len()
            ))
        })
    }

    /// Trims `name` and checks it is non-blank and unique, ignoring the
    /// member at `except`.
    fn checked_name(&self, name: &str, except: Option<usize>) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EdutronError::invalid_input("name")
                .with_reason("Team member name cannot be empty"));
        }

        let normalized = normalize_name(trimmed);
        let taken = self
            .plan()
            .team_members
            .iter()
            .enumerate()
            .any(|(i, m)| Some(i) != except && m.normalized_name() == normalized);
        if taken {
            return Err(EdutronError::invalid_input("name")
                .with_reason(format!("Team member name '{trimmed}' already exists")));
        }

        Ok(trimmed.to_string())
    }

    fn next_default_name(&self) -> String {
        let used: HashSet<String> = self
            .plan()
            .team_members
            .iter()
            .map(Person::normalized_name)
            .collect();

        if let Some(name) = DEFAULT_TEAM_NAMES
            .iter()
            .find(|name| !used.contains(&normalize_name(name)))
        {
            return name.to_string();
        }

        (self.plan().team_members.len() + 1..)
            .map(|n| format!("Team Member {n}"))
            .find(|name| !used.contains(&normalize_name(name)))
            .unwrap_or_default()
    }
}
