use std::cmp::Reverse;
use std::collections::HashMap;

use priority_queue::PriorityQueue;
use tracing::{debug, info};

use super::action::GroundedAction;
use super::condition::State;
use super::env::Env;
use super::grounding::applicable_actions;
use super::heuristics::Heuristics;

/// Applies a grounded effect set to a state. Positive effects insert their
/// literal; negated effects remove the corresponding positive literal and
/// are not themselves retained.
pub fn apply(state: &State, effects: &State) -> State {
    let mut next = state.clone();
    for effect in effects {
        if effect.truth {
            next.insert(effect.clone());
        } else {
            next.remove(&effect.negate());
        }
    }
    next
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Node {
    parent: State,
    action: Option<GroundedAction>,
    state: State,
    g: i32,
}

// Popped largest-first, so Reverse(f) yields the smallest f and the plain g
// prefers the deeper parent among equal f.
type Priority = (Reverse<i32>, i32);

/// Best-first forward search over ground states.
pub struct Planner<'a> {
    env: &'a Env,
    heuristics: Heuristics,
    expanded: usize,
}

impl<'a> Planner<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            heuristics: Heuristics::new(),
            expanded: 0,
        }
    }

    /// States dequeued by the last `plan` call.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Searches from the environment's initial conditions to its goal.
    /// Returns the empty plan when the goal is unreachable.
    pub fn plan(&mut self) -> Vec<GroundedAction> {
        let start = self.env.initial_conditions().clone();
        let goal = self.env.goal_conditions().clone();

        let mut parents: HashMap<State, (State, Option<GroundedAction>)> = HashMap::new();
        let mut cost: HashMap<State, i32> = HashMap::new();
        let mut frontier: PriorityQueue<Node, Priority> = PriorityQueue::new();

        // seeded at -1 so the first dequeue lands the start at cost 0
        cost.insert(start.clone(), -1);
        frontier.push(
            Node {
                parent: start.clone(),
                action: None,
                state: start.clone(),
                g: 0,
            },
            (Reverse(0), 0),
        );

        self.expanded = 0;
        while let Some((node, _)) = frontier.pop() {
            if parents.contains_key(&node.state) {
                // first pop wins
                continue;
            }
            self.expanded += 1;
            let node_cost = cost[&node.parent] + 1;
            parents.insert(node.state.clone(), (node.parent, node.action));
            cost.insert(node.state.clone(), node_cost);
            debug!(g = node.g, cost = node_cost, "expanding {}", node.state);

            if self.heuristics.naive(&node.state, &goal) == 0 {
                info!(expanded = self.expanded, "goal reached");
                return reconstruct(&parents, &start, node.state);
            }

            for (action, effects) in applicable_actions(&node.state, self.env) {
                let successor = apply(&node.state, &effects);
                let estimate = self.heuristics.naive(&successor, &goal);
                frontier.push(
                    Node {
                        parent: node.state.clone(),
                        action: Some(action),
                        state: successor,
                        g: node_cost,
                    },
                    (Reverse(node_cost + estimate + 1), node_cost),
                );
            }
        }

        info!(expanded = self.expanded, "frontier exhausted without reaching the goal");
        Vec::new()
    }
}

fn reconstruct(
    parents: &HashMap<State, (State, Option<GroundedAction>)>,
    start: &State,
    mut state: State,
) -> Vec<GroundedAction> {
    let mut plan = Vec::new();
    while state != *start {
        let (parent, action) = &parents[&state];
        if let Some(action) = action {
            plan.push(action.clone());
        }
        state = parent.clone();
    }
    plan.reverse();
    plan
}
