//! Domain model types for capacitated vehicle routing problems.
//!
//! Provides the core abstractions: customers with demands, vehicles with
//! capacity constraints, routes as ordered node sequences, and a problem
//! trait that ties everything together.

mod customer;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use customer::{Customer, NodeId, DEPOT_ID};
pub use problem::{Instance, RoutingProblem};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
