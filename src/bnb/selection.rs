//! Regret-based choice of the edge to branch on.

use super::BnbError;
use crate::distance::{Edge, ReducedMatrix};

/// Cells within this distance of zero count as zero-cost transitions.
pub const ZERO_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `value` is a zero-cost cell.
pub fn is_zero(value: f64) -> bool {
    value.abs() <= ZERO_TOLERANCE
}

/// Cost of *not* taking the cell (`row`, `col`): the cheapest alternative
/// leaving `row` plus the cheapest alternative entering `col`.
pub fn penalty(matrix: &ReducedMatrix, row: usize, col: usize) -> f64 {
    let n = matrix.size();
    let row_alt = (0..n)
        .filter(|&c| c != col)
        .map(|c| matrix.get(row, c))
        .fold(f64::INFINITY, f64::min);
    let col_alt = (0..n)
        .filter(|&r| r != row)
        .map(|r| matrix.get(r, col))
        .fold(f64::INFINITY, f64::min);
    row_alt + col_alt
}

/// Picks the zero cell with the largest [`penalty`].
///
/// Ties go to the first cell in row-major order. A bounded matrix always
/// holds a zero, so finding none is reported as an error.
pub fn select_edge(matrix: &ReducedMatrix) -> Result<Edge, BnbError> {
    let n = matrix.size();
    let mut best: Option<(f64, usize, usize)> = None;

    for row in 0..n {
        for col in 0..n {
            if !is_zero(matrix.get(row, col)) {
                continue;
            }
            let p = penalty(matrix, row, col);
            if best.map_or(true, |(best_p, _, _)| p > best_p) {
                best = Some((p, row, col));
            }
        }
    }

    best.map(|(_, row, col)| Edge::new(matrix.row_label(row), matrix.col_label(col)))
        .ok_or(BnbError::NoBranchingEdge { size: n })
}
