use std::collections::HashMap;

use super::condition::State;
use super::env::Env;
use super::relaxed::RelaxedLayer;

/// Sentinel distance for goals the relaxed expansion can never cover.
pub const UNREACHABLE: i32 = i32::MAX / 2;

/// Distance-to-goal estimators with per-state memo tables. One instance per
/// planner invocation; independent problems get fresh tables.
#[derive(Default)]
pub struct Heuristics {
    naive: HashMap<State, i32>,
    relaxed: HashMap<State, i32>,
}

impl Heuristics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of goal literals absent from `state`. Zero iff the goal is
    /// satisfied.
    pub fn naive(&mut self, state: &State, goal: &State) -> i32 {
        if let Some(&known) = self.naive.get(state) {
            return known;
        }
        let missing = goal
            .iter()
            .filter(|condition| !state.contains(condition))
            .count() as i32;
        self.naive.insert(state.clone(), missing);
        missing
    }

    /// Number of relaxed expansions until the goal is covered. Runs as an
    /// iterative fixpoint; every intermediate layer is memoized on the way
    /// back out. A layer that stops growing without covering the goal means
    /// the goal is unreachable even in the relaxation.
    pub fn relaxed(&mut self, state: &State, goal: &State, env: &Env) -> i32 {
        let mut trail: Vec<State> = Vec::new();
        let mut current = state.clone();
        let mut distance = loop {
            if let Some(&known) = self.relaxed.get(&current) {
                break known;
            }
            if current.contains_all(goal) {
                break 0;
            }
            let mut layer = RelaxedLayer::new(&current);
            layer.expand(env);
            let expanded = layer.into_conditions();
            if expanded == current {
                break UNREACHABLE;
            }
            trail.push(current);
            current = expanded;
        };
        self.relaxed.entry(current).or_insert(distance);
        for state in trail.into_iter().rev() {
            if distance < UNREACHABLE {
                distance += 1;
            }
            self.relaxed.insert(state, distance);
        }
        distance
    }
}
