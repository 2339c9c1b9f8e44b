//! Stitching committed edges into route fragments.
//!
//! The included edges of a search node form vertex-disjoint paths (and, once
//! the tour is complete, a single cycle). They are joined through a
//! successor map keyed by origin, walking from every vertex that has no
//! predecessor. Each walk follows at most one step per edge.

use std::collections::{HashMap, HashSet};

use crate::distance::{Edge, Label};
use crate::models::{NodeId, Route, DEPOT_ID};

/// Number of passes a retry-queue stitcher would allow before giving up on
/// an edge.
///
/// [`reconstruct`] never retries: it walks a successor map once, and each
/// walk is bounded by `edges.len()` steps, so any edge order stitches in a
/// single pass regardless of this limit.
pub const MAX_STITCH_RETRIES: usize = 10;

/// A maximal chain of committed edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    vertices: Vec<Label>,
    closed: bool,
}

impl Fragment {
    /// Vertices in travel order. A closed fragment does not repeat its start.
    pub fn vertices(&self) -> &[Label] {
        &self.vertices
    }

    /// Returns `true` if the chain loops back onto its first vertex.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// First vertex of the chain.
    pub fn head(&self) -> Label {
        self.vertices[0]
    }

    /// Last vertex of the chain.
    pub fn tail(&self) -> Label {
        self.vertices[self.vertices.len() - 1]
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the fragment covers no vertex.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Splits the fragment at depot duplicates into node-id routes.
    ///
    /// Segments between two depot visits come out as closed routes; the
    /// ends of an open chain may yield open routes. A closed chain is
    /// rotated to start at its first depot duplicate.
    pub fn routes(&self) -> Vec<Route> {
        let mut walk: Vec<Label> = match self.vertices.iter().position(Label::is_depot) {
            Some(start) if self.closed => {
                let mut rotated = self.vertices[start..].to_vec();
                rotated.extend_from_slice(&self.vertices[..start]);
                rotated
            }
            _ => self.vertices.clone(),
        };
        if self.closed {
            walk.push(walk[0]);
        }

        let mut routes = Vec::new();
        let mut current: Vec<NodeId> = Vec::new();
        for label in walk {
            if label.is_depot() {
                if !current.is_empty() {
                    current.push(DEPOT_ID);
                    routes.push(Route::new(std::mem::take(&mut current)));
                }
                current.push(DEPOT_ID);
            } else {
                current.push(label.node());
            }
        }
        if current.iter().any(|&id| id != DEPOT_ID) {
            routes.push(Route::new(current));
        }
        routes
    }
}

/// Joins `edges` into fragments.
///
/// Open chains come first, ordered by the position of their first edge in
/// `edges`; a remaining cycle follows.
pub fn reconstruct(edges: &[Edge]) -> Vec<Fragment> {
    let successor: HashMap<Label, Label> = edges.iter().map(|e| (e.from, e.to)).collect();
    let entered: HashSet<Label> = edges.iter().map(|e| e.to).collect();
    let mut walked = HashSet::new();
    let mut fragments = Vec::new();

    for edge in edges.iter().filter(|e| !entered.contains(&e.from)) {
        let vertices = walk(edge.from, &successor, edges.len(), &mut walked);
        fragments.push(Fragment {
            vertices,
            closed: false,
        });
    }

    for edge in edges {
        if walked.contains(&edge.from) {
            continue;
        }
        let vertices = walk(edge.from, &successor, edges.len(), &mut walked);
        fragments.push(Fragment {
            vertices,
            closed: true,
        });
    }

    fragments
}

/// Converts the fragments of `edges` into routes, in fragment order.
pub fn routes_of(edges: &[Edge]) -> Vec<Route> {
    reconstruct(edges).iter().flat_map(Fragment::routes).collect()
}

fn walk(
    start: Label,
    successor: &HashMap<Label, Label>,
    max_steps: usize,
    walked: &mut HashSet<Label>,
) -> Vec<Label> {
    let mut vertices = vec![start];
    let mut current = start;
    for _ in 0..=max_steps {
        walked.insert(current);
        match successor.get(&current) {
            Some(&next) if next != start => {
                vertices.push(next);
                current = next;
            }
            _ => break,
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(slot: usize) -> Label {
        Label::depot(slot)
    }

    fn c(id: NodeId) -> Label {
        Label::customer(id)
    }

    fn e(from: Label, to: Label) -> Edge {
        Edge::new(from, to)
    }

    #[test]
    fn test_single_edge() {
        let fragments = reconstruct(&[e(d(0), c(3))]);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].vertices(), &[d(0), c(3)]);
        assert!(!fragments[0].is_closed());
    }

    #[test]
    fn test_order_independent_stitching() {
        // 4 -> 5, 1#0 -> 4, 5 -> 1#1 given out of order
        let edges = [e(c(4), c(5)), e(c(5), d(1)), e(d(0), c(4))];
        let fragments = reconstruct(&edges);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].head(), d(0));
        assert_eq!(fragments[0].tail(), d(1));
        assert_eq!(fragments[0].len(), 4);
    }

    #[test]
    fn test_disjoint_fragments() {
        let edges = [e(c(2), c(3)), e(d(0), c(4)), e(c(3), c(5))];
        let fragments = reconstruct(&edges);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].vertices(), &[c(2), c(3), c(5)]);
        assert_eq!(fragments[1].vertices(), &[d(0), c(4)]);
    }

    #[test]
    fn test_complete_tour_is_closed() {
        let edges = [
            e(d(0), c(2)),
            e(c(2), d(1)),
            e(d(1), c(3)),
            e(c(3), c(4)),
            e(c(4), d(0)),
        ];
        let fragments = reconstruct(&edges);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].is_closed());
        assert_eq!(fragments[0].len(), 5);

        let routes = fragments[0].routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].nodes(), &[1, 2, 1]);
        assert_eq!(routes[1].nodes(), &[1, 3, 4, 1]);
    }

    #[test]
    fn test_closed_tour_rotates_to_depot() {
        let edges = [e(c(3), d(0)), e(d(0), c(2)), e(c(2), c(3))];
        let routes = routes_of(&edges);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].nodes(), &[1, 2, 3, 1]);
    }

    #[test]
    fn test_open_fragment_routes() {
        // 2 -> 1#0 -> 3 -> 4 -> 1#1 -> 5
        let edges = [
            e(c(2), d(0)),
            e(d(0), c(3)),
            e(c(3), c(4)),
            e(c(4), d(1)),
            e(d(1), c(5)),
        ];
        let routes = routes_of(&edges);
        let nodes: Vec<&[NodeId]> = routes.iter().map(|r| r.nodes()).collect();
        assert_eq!(nodes, vec![&[2, 1][..], &[1, 3, 4, 1][..], &[1, 5][..]]);
    }

    #[test]
    fn test_long_reversed_chain_needs_no_retries() {
        // each edge only attaches to the one listed after it
        let mut edges = vec![e(d(0), c(2))];
        edges.extend((2..=MAX_STITCH_RETRIES + 3).map(|id| e(c(id), c(id + 1))));
        edges.push(e(c(MAX_STITCH_RETRIES + 4), d(1)));
        edges.reverse();

        let fragments = reconstruct(&edges);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].len(), edges.len() + 1);
        assert_eq!(fragments[0].head(), d(0));
        assert_eq!(fragments[0].tail(), d(1));

        let routes = routes_of(&edges);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].len(), MAX_STITCH_RETRIES + 3);
    }

    #[test]
    fn test_empty_edges() {
        assert!(reconstruct(&[]).is_empty());
        assert!(routes_of(&[]).is_empty());
    }
}
