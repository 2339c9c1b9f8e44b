//! # cvrp-bnb
//!
//! Exact solver for the capacitated vehicle routing problem (CVRP) based on
//! Little's branch-and-bound. The fleet is modelled by duplicating the depot
//! once per vehicle, which turns the routing problem into a single
//! travelling-salesman tour over an augmented matrix.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Vehicle, Route, Solution, Problem trait)
//! - [`distance`] — Raw distance matrix and the labelled, depot-augmented matrix
//! - [`evaluation`] — Route cost evaluation and capacity feasibility
//! - [`constructive`] — Nearest-neighbor construction used as a warm start
//! - [`bnb`] — Reduction, branching, route reconstruction and the search engine

pub mod bnb;
pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod models;
