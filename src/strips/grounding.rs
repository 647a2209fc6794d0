use std::collections::{BTreeMap, BTreeSet};

use super::action::{ground, GroundedAction};
use super::condition::{Condition, State};
use super::env::Env;

/// A mapping from names to symbols. The base binding maps every environment
/// symbol to itself; variables are added as preconditions are matched.
pub type Binding = BTreeMap<String, String>;

/// Extends `partial` over the unbound variables of `condition` in every way
/// that makes the grounded literal present in `state`.
///
/// Symbols already assigned to a variable are excluded from further
/// assignment; identity entries (a symbol mapped to itself) never count as
/// assigned. This keeps distinct schema parameters bound to distinct
/// symbols while letting any variable share a symbol with a constant.
pub fn match_condition(
    condition: &Condition,
    partial: &Binding,
    state: &State,
    symbols: &BTreeSet<String>,
) -> Vec<Binding> {
    let mut free: Vec<&String> = Vec::new();
    for arg in &condition.args {
        if !partial.contains_key(arg) && !free.contains(&arg) {
            free.push(arg);
        }
    }

    let mut possible = Vec::new();
    let mut frontier: Vec<(Binding, usize)> = vec![(partial.clone(), 0)];
    while let Some((binding, index)) = frontier.pop() {
        if index == free.len() {
            // complete over this literal; keep it only if the grounded form
            // is explicitly present (negated literals included)
            if state.contains(&condition.ground(&binding)) {
                possible.push(binding);
            }
        } else {
            let used: BTreeSet<&String> = binding
                .iter()
                .filter(|(name, symbol)| name != symbol)
                .map(|(_, symbol)| symbol)
                .collect();
            for symbol in symbols {
                if !used.contains(symbol) {
                    let mut extended = binding.clone();
                    extended.insert(free[index].clone(), symbol.clone());
                    frontier.push((extended, index + 1));
                }
            }
        }
    }
    possible
}

/// Enumerates every ground action applicable in `state`, paired with its
/// grounded effect set.
pub fn applicable_actions(state: &State, env: &Env) -> Vec<(GroundedAction, State)> {
    let mut base = Binding::new();
    for symbol in env.symbols() {
        base.insert(symbol.clone(), symbol.clone());
    }

    let mut all = Vec::new();
    for action in env.actions() {
        let mut frontier: Vec<(Binding, usize)> = vec![(base.clone(), 0)];
        while let Some((binding, index)) = frontier.pop() {
            if index == action.preconditions.len() {
                all.push(ground(action, &binding));
            } else {
                for extended in
                    match_condition(&action.preconditions[index], &binding, state, env.symbols())
                {
                    frontier.push((extended, index + 1));
                }
            }
        }
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strips::action::Action;
    use crate::strips::condition::GroundedCondition;

    fn cond(predicate: &str, args: &[&str], truth: bool) -> Condition {
        Condition::new(predicate, args.iter().map(|a| a.to_string()).collect(), truth)
    }

    fn fact(predicate: &str, args: &[&str]) -> GroundedCondition {
        GroundedCondition::new(predicate, args.iter().map(|a| a.to_string()).collect())
    }

    fn blocks_env() -> Env {
        let mut env = Env::new();
        env.add_symbols(["A".to_string(), "B".to_string(), "Table".to_string()]);
        for condition in [
            fact("On", &["A", "Table"]),
            fact("On", &["B", "Table"]),
            fact("Clear", &["A"]),
            fact("Clear", &["B"]),
        ] {
            env.add_initial_condition(condition);
        }
        env.add_action(Action::new(
            "Stack",
            vec!["x".to_string(), "y".to_string()],
            vec![
                cond("Clear", &["x"], true),
                cond("Clear", &["y"], true),
                cond("On", &["x", "Table"], true),
            ],
            vec![
                cond("On", &["x", "y"], true),
                cond("Clear", &["y"], false),
                cond("On", &["x", "Table"], false),
            ],
        ));
        env
    }

    #[test]
    fn enumerates_every_applicable_binding() {
        let env = blocks_env();
        let state = env.initial_conditions().clone();
        let mut names: Vec<String> = applicable_actions(&state, &env)
            .iter()
            .map(|(action, _)| action.to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["Stack(A,B)", "Stack(B,A)"]);
    }

    #[test]
    fn grounded_preconditions_hold_in_the_matched_state() {
        let env = blocks_env();
        let state = env.initial_conditions().clone();
        let stack = env.get_action("Stack").unwrap();
        for binding in match_condition(&stack.preconditions[0], &Binding::new(), &state, env.symbols())
        {
            assert!(state.contains(&stack.preconditions[0].ground(&binding)));
        }
    }

    #[test]
    fn distinct_variables_bind_distinct_symbols() {
        let mut env = Env::new();
        env.add_symbols(["A".to_string(), "B".to_string()]);
        env.add_initial_condition(fact("Adj", &["A", "B"]));
        env.add_initial_condition(fact("Adj", &["B", "A"]));
        env.add_action(Action::new(
            "Move",
            vec!["x".to_string(), "y".to_string()],
            vec![cond("Adj", &["x", "y"], true)],
            vec![cond("Visited", &["x"], true), cond("Visited", &["y"], true)],
        ));

        let state = env.initial_conditions().clone();
        let actions = applicable_actions(&state, &env);
        assert!(!actions.is_empty());
        for (action, _) in &actions {
            assert_ne!(action.args[0], action.args[1]);
        }
    }

    #[test]
    fn variables_may_collide_with_constants() {
        // Landing on a symbol that only appears as a constant elsewhere in
        // the schema is allowed; only variable-to-variable reuse is not.
        let mut env = Env::new();
        env.add_symbols(["A".to_string(), "Table".to_string()]);
        env.add_initial_condition(fact("On", &["A", "Table"]));
        env.add_initial_condition(fact("Heavy", &["Table"]));
        env.add_action(Action::new(
            "Check",
            vec!["x".to_string()],
            vec![cond("On", &["A", "Table"], true), cond("Heavy", &["x"], true)],
            vec![cond("Checked", &["x"], true)],
        ));

        let state = env.initial_conditions().clone();
        let actions = applicable_actions(&state, &env);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].0.to_string(), "Check(Table)");
    }

    #[test]
    fn negated_precondition_needs_the_explicit_negated_literal() {
        let mut env = Env::new();
        env.add_symbol("A");
        env.add_action(Action::new(
            "Fix",
            vec!["x".to_string()],
            vec![cond("Broken", &["x"], false)],
            vec![cond("Fixed", &["x"], true)],
        ));

        // Absence of Broken(A) is not enough under the matching convention.
        let empty = State::new();
        assert!(applicable_actions(&empty, &env).is_empty());

        let negated: State = [fact("Broken", &["A"]).negate()].into_iter().collect();
        let actions = applicable_actions(&negated, &env);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].0.to_string(), "Fix(A)");
    }

    #[test]
    fn effect_sets_are_grounded_with_truth_flags() {
        let env = blocks_env();
        let state = env.initial_conditions().clone();
        let actions = applicable_actions(&state, &env);
        let (_, effects) = actions
            .iter()
            .find(|(action, _)| action.to_string() == "Stack(A,B)")
            .unwrap();
        assert!(effects.contains(&fact("On", &["A", "B"])));
        assert!(effects.contains(&fact("Clear", &["B"]).negate()));
        assert!(effects.contains(&fact("On", &["A", "Table"]).negate()));
    }
}
