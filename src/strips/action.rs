use std::fmt;

use super::condition::{Condition, State};
use super::grounding::Binding;

/// A lifted action schema. Preconditions are kept in parse order; the
/// grounding engine walks them as an indexed list.
#[derive(Clone, Debug)]
pub struct Action {
    pub name: String,
    pub params: Vec<String>,
    pub preconditions: Vec<Condition>,
    pub effects: Vec<Condition>,
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        params: Vec<String>,
        preconditions: Vec<Condition>,
        effects: Vec<Condition>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            preconditions,
            effects,
        }
    }
}

// Schema identity is name and arity; the environment keeps at most one
// schema per name.
impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params.len() == other.params.len()
    }
}

impl Eq for Action {}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}({})", self.name, self.params.join(","))?;
        write!(f, "Preconditions:")?;
        for precondition in &self.preconditions {
            write!(f, " {}", precondition)?;
        }
        writeln!(f)?;
        write!(f, "Effects:")?;
        for effect in &self.effects {
            write!(f, " {}", effect)?;
        }
        writeln!(f)
    }
}

/// An action schema with every parameter bound to a symbol.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroundedAction {
    pub name: String,
    pub args: Vec<String>,
}

impl GroundedAction {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for GroundedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(","))
    }
}

/// Grounds a schema under a binding that is total over its parameters,
/// yielding the ground action and its grounded effect set. Truth flags of
/// the effects are preserved.
pub fn ground(action: &Action, binding: &Binding) -> (GroundedAction, State) {
    let args = action
        .params
        .iter()
        .map(|param| binding[param.as_str()].clone())
        .collect();
    let effects: State = action
        .effects
        .iter()
        .map(|effect| effect.ground(binding))
        .collect();
    (GroundedAction::new(action.name.clone(), args), effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strips::condition::GroundedCondition;

    #[test]
    fn grounding_substitutes_params_and_keeps_truth_flags() {
        let stack = Action::new(
            "Stack",
            vec!["x".to_string(), "y".to_string()],
            vec![],
            vec![
                Condition::new("On", vec!["x".to_string(), "y".to_string()], true),
                Condition::new("Clear", vec!["y".to_string()], false),
            ],
        );
        let mut binding = Binding::new();
        binding.insert("x".to_string(), "A".to_string());
        binding.insert("y".to_string(), "B".to_string());

        let (grounded, effects) = ground(&stack, &binding);
        assert_eq!(grounded.to_string(), "Stack(A,B)");
        assert_eq!(effects.len(), 2);
        assert!(effects.contains(&GroundedCondition::new(
            "On",
            vec!["A".to_string(), "B".to_string()]
        )));
        assert!(effects.contains(&GroundedCondition::negated("Clear", vec!["B".to_string()])));
    }

    #[test]
    fn grounding_maps_constants_through_identity() {
        let to_table = Action::new(
            "PutDown",
            vec!["x".to_string()],
            vec![],
            vec![Condition::new(
                "On",
                vec!["x".to_string(), "Table".to_string()],
                true,
            )],
        );
        let mut binding = Binding::new();
        binding.insert("Table".to_string(), "Table".to_string());
        binding.insert("x".to_string(), "A".to_string());

        let (grounded, effects) = ground(&to_table, &binding);
        assert_eq!(grounded.to_string(), "PutDown(A)");
        assert!(effects.contains(&GroundedCondition::new(
            "On",
            vec!["A".to_string(), "Table".to_string()]
        )));
    }

    #[test]
    fn schema_equality_is_name_and_arity() {
        let a = Action::new("Move", vec!["x".to_string()], vec![], vec![]);
        let b = Action::new(
            "Move",
            vec!["y".to_string()],
            vec![Condition::new("P", vec!["y".to_string()], true)],
            vec![],
        );
        let c = Action::new("Move", vec!["x".to_string(), "y".to_string()], vec![], vec![]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
