use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;

use super::action::Action;
use super::condition::{GroundedCondition, State};
use super::Error;

/// The planning environment: symbol universe, initial and goal conditions,
/// and one action schema per name. Built incrementally by the parser and
/// left untouched during search.
#[derive(Clone, Debug, Default)]
pub struct Env {
    symbols: BTreeSet<String>,
    initial: State,
    goal: State,
    actions: BTreeMap<String, Action>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&mut self, symbol: impl Into<String>) {
        self.symbols.insert(symbol.into());
    }

    pub fn add_symbols(&mut self, symbols: impl IntoIterator<Item = String>) {
        self.symbols.extend(symbols);
    }

    pub fn add_initial_condition(&mut self, condition: GroundedCondition) {
        self.initial.insert(condition);
    }

    pub fn remove_initial_condition(&mut self, condition: &GroundedCondition) {
        self.initial.remove(condition);
    }

    pub fn add_goal_condition(&mut self, condition: GroundedCondition) {
        self.goal.insert(condition);
    }

    pub fn remove_goal_condition(&mut self, condition: &GroundedCondition) {
        self.goal.remove(condition);
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.insert(action.name.clone(), action);
    }

    pub fn get_action(&self, name: &str) -> Result<&Action, Error> {
        self.actions
            .get(name)
            .ok_or_else(|| Error::UnknownAction(name.to_string()))
    }

    pub fn symbols(&self) -> &BTreeSet<String> {
        &self.symbols
    }

    pub fn actions(&self) -> btree_map::Values<'_, String, Action> {
        self.actions.values()
    }

    pub fn initial_conditions(&self) -> &State {
        &self.initial
    }

    pub fn goal_conditions(&self) -> &State {
        &self.goal
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Symbols: {}",
            self.symbols.iter().cloned().collect::<Vec<_>>().join(",")
        )?;
        write!(f, "Initial conditions:")?;
        for condition in &self.initial {
            write!(f, " {}", condition)?;
        }
        writeln!(f)?;
        write!(f, "Goal conditions:")?;
        for condition in &self.goal {
            write!(f, " {}", condition)?;
        }
        writeln!(f)?;
        writeln!(f, "Actions:")?;
        for action in self.actions.values() {
            writeln!(f, "{}", action)?;
        }
        Ok(())
    }
}
