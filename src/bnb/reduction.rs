//! Little's row/column reduction.
//!
//! Subtracting the minimum of every row, then of every column, leaves a
//! matrix with a zero in each line that still has a finite entry. The sum of
//! the subtracted minima is a lower bound on the cost any completion adds.

use crate::distance::ReducedMatrix;

/// Reduces `matrix` in place and returns the bound contribution.
///
/// Lines without a finite entry contribute nothing.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::bnb::reduce;
/// use cvrp_bnb::distance::{DistanceMatrix, ReducedMatrix};
///
/// let raw = DistanceMatrix::from_rows(&[
///     vec![0.0, 3.0, 5.0],
///     vec![3.0, 0.0, 4.0],
///     vec![5.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// let mut m = ReducedMatrix::augment(&raw, 1);
/// assert_eq!(reduce(&mut m), 11.0);
/// assert_eq!(reduce(&mut m), 0.0);
/// ```
pub fn reduce(matrix: &mut ReducedMatrix) -> f64 {
    let n = matrix.size();
    let mut bound = 0.0;

    for r in 0..n {
        let min = line_min((0..n).map(|c| matrix.get(r, c)));
        if let Some(min) = min {
            for c in 0..n {
                let value = matrix.get(r, c);
                if value.is_finite() {
                    matrix.set(r, c, value - min);
                }
            }
            bound += min;
        }
    }

    for c in 0..n {
        let min = line_min((0..n).map(|r| matrix.get(r, c)));
        if let Some(min) = min {
            for r in 0..n {
                let value = matrix.get(r, c);
                if value.is_finite() {
                    matrix.set(r, c, value - min);
                }
            }
            bound += min;
        }
    }

    bound
}

/// Smallest finite non-zero minimum of a line, `None` when nothing to subtract.
fn line_min(values: impl Iterator<Item = f64>) -> Option<f64> {
    let min = values.fold(f64::INFINITY, f64::min);
    (min.is_finite() && min != 0.0).then_some(min)
}
