pub mod action;
pub mod condition;
pub mod env;
pub mod grounding;
pub mod heuristics;
pub mod parser;
pub mod planner;
pub mod relaxed;

pub use action::{Action, GroundedAction};
pub use condition::{Condition, GroundedCondition, State};
pub use env::Env;
pub use planner::Planner;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("action {0} is not defined")]
    UnknownAction(String),
}
