//! Augmented multi-depot matrix used by the branch-and-bound search.
//!
//! The depot is duplicated once per vehicle so that a fleet of `k` routes
//! becomes a single tour over `customers + k` vertices. Every row and column
//! keeps a [`Label`] so edges stay addressable while rows and columns are
//! deleted during the search.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DistanceMatrix;
use crate::models::{NodeId, DEPOT_ID};

/// Identity of a row or column of the augmented matrix.
///
/// `node` is the original node id. Depot duplicates share [`DEPOT_ID`] and
/// are told apart by `slot` (one per vehicle); customers always use slot 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label {
    node: NodeId,
    slot: usize,
}

impl Label {
    /// Label of the depot duplicate for vehicle slot `slot`.
    pub fn depot(slot: usize) -> Self {
        Self {
            node: DEPOT_ID,
            slot,
        }
    }

    /// Label of a customer.
    pub fn customer(node: NodeId) -> Self {
        Self { node, slot: 0 }
    }

    /// Original node id.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Vehicle slot (always 0 for customers).
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns `true` for a depot duplicate.
    pub fn is_depot(&self) -> bool {
        self.node == DEPOT_ID
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_depot() {
            write!(f, "{}#{}", self.node, self.slot)
        } else {
            write!(f, "{}", self.node)
        }
    }
}

/// A directed transition between two labelled vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    /// Origin vertex.
    pub from: Label,
    /// Destination vertex.
    pub to: Label,
}

impl Edge {
    /// Creates an edge.
    pub fn new(from: Label, to: Label) -> Self {
        Self { from, to }
    }

    /// The edge as a pair of original node ids.
    pub fn node_ids(&self) -> (NodeId, NodeId) {
        (self.from.node(), self.to.node())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {})", self.from, self.to)
    }
}

/// Square cost matrix with labelled rows and columns.
///
/// Forbidden transitions hold `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::distance::{DistanceMatrix, Label, ReducedMatrix};
///
/// let raw = DistanceMatrix::from_rows(&[
///     vec![0.0, 4.0, 6.0],
///     vec![4.0, 0.0, 5.0],
///     vec![6.0, 5.0, 0.0],
/// ])
/// .unwrap();
/// let m = ReducedMatrix::augment(&raw, 2);
/// assert_eq!(m.size(), 4);
/// assert_eq!(m.row_label(1), Label::depot(1));
/// assert_eq!(m.get(0, 2), 4.0);
/// assert!(m.get(0, 1).is_infinite());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedMatrix {
    rows: Vec<Label>,
    cols: Vec<Label>,
    cells: Vec<f64>,
}

impl ReducedMatrix {
    /// Builds the augmented matrix from the raw distances and fleet size.
    ///
    /// Rows/columns `0..fleet_size` are depot duplicates, the rest are the
    /// customers in id order. Depot↔depot transitions and the diagonal are
    /// infinite.
    pub fn augment(distances: &DistanceMatrix, fleet_size: usize) -> Self {
        let labels: Vec<Label> = (0..fleet_size)
            .map(Label::depot)
            .chain((DEPOT_ID + 1..=distances.size()).map(Label::customer))
            .collect();

        let mut cells = Vec::with_capacity(labels.len() * labels.len());
        for from in &labels {
            for to in &labels {
                let cost = if from == to || (from.is_depot() && to.is_depot()) {
                    f64::INFINITY
                } else {
                    distances.between(from.node(), to.node())
                };
                cells.push(cost);
            }
        }

        Self {
            rows: labels.clone(),
            cols: labels,
            cells,
        }
    }

    /// Number of data rows (equal to the number of data columns).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at data position (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols.len() + col]
    }

    /// Overwrites the cell at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let width = self.cols.len();
        self.cells[row * width + col] = value;
    }

    /// Marks the transition at (`row`, `col`) as forbidden.
    pub fn forbid(&mut self, row: usize, col: usize) {
        self.set(row, col, f64::INFINITY);
    }

    /// The values of one data row.
    pub fn row(&self, row: usize) -> &[f64] {
        let width = self.cols.len();
        &self.cells[row * width..(row + 1) * width]
    }

    /// Label of data row `row`.
    pub fn row_label(&self, row: usize) -> Label {
        self.rows[row]
    }

    /// Label of data column `col`.
    pub fn col_label(&self, col: usize) -> Label {
        self.cols[col]
    }

    /// Row labels in matrix order.
    pub fn row_labels(&self) -> &[Label] {
        &self.rows
    }

    /// Column labels in matrix order.
    pub fn col_labels(&self) -> &[Label] {
        &self.cols
    }

    /// Current data position of an edge, if both its endpoints are still present.
    pub fn locate(&self, edge: &Edge) -> Option<(usize, usize)> {
        let row = self.rows.iter().position(|l| *l == edge.from)?;
        let col = self.cols.iter().position(|l| *l == edge.to)?;
        Some((row, col))
    }

    /// Deletes one row and one column.
    pub fn remove(&mut self, row: usize, col: usize) {
        let width = self.cols.len();
        self.cells = self
            .cells
            .chunks(width)
            .enumerate()
            .filter(|(r, _)| *r != row)
            .flat_map(|(_, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(move |(c, _)| *c != col)
                    .map(|(_, v)| *v)
            })
            .collect();
        self.rows.remove(row);
        self.cols.remove(col);
    }

    /// Returns `true` if some row or column has no finite entry.
    pub fn has_blocked_line(&self) -> bool {
        let n = self.size();
        let blocked_row = (0..n).any(|r| self.row(r).iter().all(|v| v.is_infinite()));
        let blocked_col = (0..n).any(|c| (0..n).all(|r| self.get(r, c).is_infinite()));
        blocked_row || blocked_col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 2.0, 3.0, 4.0],
            vec![5.0, 0.0, 6.0, 7.0],
            vec![8.0, 9.0, 0.0, 1.0],
            vec![2.5, 3.5, 4.5, 0.0],
        ])
        .expect("square")
    }

    #[test]
    fn test_augment_labels() {
        let m = ReducedMatrix::augment(&raw(), 2);
        assert_eq!(m.size(), 5);
        assert_eq!(
            m.row_labels(),
            &[
                Label::depot(0),
                Label::depot(1),
                Label::customer(2),
                Label::customer(3),
                Label::customer(4),
            ]
        );
        assert_eq!(m.row_labels(), m.col_labels());
    }

    #[test]
    fn test_augment_cells() {
        let m = ReducedMatrix::augment(&raw(), 2);
        // depot duplicates never connect to each other
        assert!(m.get(0, 1).is_infinite());
        assert!(m.get(1, 0).is_infinite());
        assert!(m.get(0, 0).is_infinite());
        // depot -> customer copies the depot row
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(1, 4), 4.0);
        // customer -> depot copies the depot column
        assert_eq!(m.get(3, 0), 8.0);
        assert_eq!(m.get(4, 1), 2.5);
        // customer -> customer copies D, diagonal forbidden
        assert_eq!(m.get(2, 3), 6.0);
        assert_eq!(m.get(3, 4), 1.0);
        assert!(m.get(3, 3).is_infinite());
    }

    #[test]
    fn test_augment_is_deterministic() {
        assert_eq!(ReducedMatrix::augment(&raw(), 3), ReducedMatrix::augment(&raw(), 3));
    }

    #[test]
    fn test_remove_keeps_labels_aligned() {
        let mut m = ReducedMatrix::augment(&raw(), 1);
        let edge = Edge::new(Label::customer(3), Label::customer(4));
        let (r, c) = m.locate(&edge).expect("present");
        m.remove(r, c);
        assert_eq!(m.size(), 3);
        assert!(m.locate(&edge).is_none());
        assert_eq!(m.row_labels(), &[Label::depot(0), Label::customer(2), Label::customer(4)]);
        assert_eq!(m.col_labels(), &[Label::depot(0), Label::customer(2), Label::customer(3)]);
        // 4 -> 3 keeps its original value
        let (r, c) = m
            .locate(&Edge::new(Label::customer(4), Label::customer(3)))
            .expect("present");
        assert_eq!(m.get(r, c), 4.5);
    }

    #[test]
    fn test_blocked_line() {
        let mut m = ReducedMatrix::augment(&raw(), 1);
        assert!(!m.has_blocked_line());
        for c in 0..m.size() {
            m.forbid(1, c);
        }
        assert!(m.has_blocked_line());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::depot(2).to_string(), "1#2");
        let edge = Edge::new(Label::customer(5), Label::depot(0));
        assert_eq!(edge.to_string(), "(5 -> 1#0)");
        assert_eq!(edge.node_ids(), (5, 1));
    }
}
