//! Distance matrices.
//!
//! Provides the dense raw distance matrix of a problem and the augmented,
//! labelled matrix the branch-and-bound search reduces.

mod augmented;
mod matrix;

pub use augmented::{Edge, Label, ReducedMatrix};
pub use matrix::DistanceMatrix;
