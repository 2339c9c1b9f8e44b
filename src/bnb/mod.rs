//! Little's branch-and-bound for the capacitated vehicle routing problem.
//!
//! The depot is duplicated once per vehicle and the instance is solved as a
//! single tour over the augmented matrix. Every search node carries a
//! reduced matrix whose accumulated reduction is a lower bound on any tour
//! completing it; splitting on the zero cell with the largest regret keeps
//! the tree shallow, and the capacity check cuts branches whose partial
//! routes already overflow a vehicle.
//!
//! # Examples
//!
//! ```
//! use cvrp_bnb::bnb;
//! use cvrp_bnb::models::{Customer, Instance, Vehicle};
//!
//! let instance = Instance::euclidean(
//!     vec![
//!         Customer::depot(0.0, 0.0),
//!         Customer::new(2, 2.0, 0.0, 3),
//!         Customer::new(3, -2.0, 0.0, 3),
//!     ],
//!     Vehicle::fleet(2, 4),
//! );
//!
//! let outcome = bnb::solve(&instance, None).unwrap();
//! assert_eq!(outcome.routes().len(), 2);
//! assert!((outcome.best_distance().unwrap() - 8.0).abs() < 1e-10);
//! ```

mod config;
mod engine;
mod error;
mod outcome;
mod partial;
mod reconstruct;
mod reduction;
mod selection;
mod stats;

pub use config::{BnbConfig, DEFAULT_MAX_ITERATIONS};
pub use engine::{solve, BranchAndBound};
pub use error::BnbError;
pub use outcome::{BnbOutcome, Termination};
pub use partial::{Feasibility, PartialSolution, LEAF_SIZE};
pub use reconstruct::{reconstruct, routes_of, Fragment, MAX_STITCH_RETRIES};
pub use reduction::reduce;
pub use selection::{is_zero, penalty, select_edge, ZERO_TOLERANCE};
pub use stats::{NodeFate, SearchStatistics};
