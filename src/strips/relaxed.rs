use super::condition::State;
use super::env::Env;
use super::grounding::applicable_actions;

/// One monotone step of relaxed reachability over a previous state. The
/// layer starts as a copy of the previous state (the no-op carry-over) and
/// `expand` only ever adds literals, so it overapproximates what one action
/// step can reach.
pub struct RelaxedLayer<'a> {
    previous: &'a State,
    conditions: State,
}

impl<'a> RelaxedLayer<'a> {
    pub fn new(previous: &'a State) -> Self {
        Self {
            previous,
            conditions: previous.clone(),
        }
    }

    /// Unions in the effect set of every ground action applicable in the
    /// previous state. Negated effects are inserted as negated literals;
    /// nothing is ever removed.
    pub fn expand(&mut self, env: &Env) {
        for (_, effects) in applicable_actions(self.previous, env) {
            self.conditions.extend(effects.iter().cloned());
        }
    }

    pub fn conditions(&self) -> &State {
        &self.conditions
    }

    pub fn into_conditions(self) -> State {
        self.conditions
    }

    pub fn contains(&self, target: &State) -> bool {
        self.conditions.contains_all(target)
    }
}
