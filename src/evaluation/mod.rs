//! Route evaluation: distance and load computation, capacity feasibility.

mod evaluator;
mod feasibility;

pub use evaluator::RouteEvaluator;
pub use feasibility::FeasibilityChecker;
