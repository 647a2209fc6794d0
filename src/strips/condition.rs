use std::collections::btree_set;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::grounding::Binding;

/// A lifted literal: predicate over names that may be schema variables or
/// environment symbols. Which is which is decided by the binding at
/// grounding time.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Condition {
    pub predicate: String,
    pub args: Vec<String>,
    pub truth: bool,
}

impl Condition {
    pub fn new(predicate: impl Into<String>, args: Vec<String>, truth: bool) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            truth,
        }
    }

    /// Substitutes every argument through the binding. The binding must be
    /// total over the literal's arguments.
    pub fn ground(&self, binding: &Binding) -> GroundedCondition {
        GroundedCondition {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|a| binding[a.as_str()].clone()).collect(),
            truth: self.truth,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.truth {
            write!(f, "!")?;
        }
        write!(f, "{}({})", self.predicate, self.args.join(","))
    }
}

/// A ground literal. Equality and ordering include the truth flag: a fact
/// and its negation are distinct members of a state.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroundedCondition {
    pub predicate: String,
    pub args: Vec<String>,
    pub truth: bool,
}

impl GroundedCondition {
    pub fn new(predicate: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            truth: true,
        }
    }

    pub fn negated(predicate: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            truth: false,
        }
    }

    pub fn negate(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            truth: !self.truth,
        }
    }

    pub fn is_negation_of(&self, other: &Self) -> bool {
        self.predicate == other.predicate && self.args == other.args && self.truth != other.truth
    }
}

impl fmt::Display for GroundedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.truth {
            write!(f, "!")?;
        }
        write!(f, "{}({})", self.predicate, self.args.join(","))
    }
}

/// An unordered set of ground literals. Backed by an ordered set so that
/// iteration order is stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State(BTreeSet<GroundedCondition>);

impl State {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, condition: GroundedCondition) -> bool {
        self.0.insert(condition)
    }

    pub fn remove(&mut self, condition: &GroundedCondition) -> bool {
        self.0.remove(condition)
    }

    pub fn contains(&self, condition: &GroundedCondition) -> bool {
        self.0.contains(condition)
    }

    /// True iff every literal of `other` is present here.
    pub fn contains_all(&self, other: &State) -> bool {
        other.iter().all(|condition| self.0.contains(condition))
    }

    pub fn iter(&self) -> btree_set::Iter<'_, GroundedCondition> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Permutation invariant: XOR-fold of per-literal hashes, seeded by
        // the cardinality.
        let mut digest = self.0.len() as u64;
        for condition in &self.0 {
            let mut hasher = DefaultHasher::new();
            condition.hash(&mut hasher);
            digest ^= hasher.finish();
        }
        digest.hash(state);
    }
}

impl FromIterator<GroundedCondition> for State {
    fn from_iter<I: IntoIterator<Item = GroundedCondition>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<GroundedCondition> for State {
    fn extend<I: IntoIterator<Item = GroundedCondition>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = &'a GroundedCondition;
    type IntoIter = btree_set::Iter<'a, GroundedCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state:")?;
        for condition in &self.0 {
            write!(f, " {}", condition)?;
        }
        Ok(())
    }
}
