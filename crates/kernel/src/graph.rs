//! Planar-graph ring merging.
//!
//! Two rings that overlap by a positive area are merged into one by
//! building a graph of their vertices and pairwise intersection points,
//! then tracing the outer face with a maximum-turn rule.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, instrument};

use planar_types::{Coordinate, LinearRing};

use crate::clip::{bits, ring_contacts, ring_relation, split_maps, RingRelation};
use crate::Tolerance;

new_key_type! {
    struct NodeId;
}

#[derive(Debug)]
struct GraphEdge {
    to: NodeId,
    distance: f64,
    /// Polar angle of the edge direction as seen from the owning node.
    angle: f64,
    traversed: bool,
}

#[derive(Debug)]
struct GraphNode {
    coordinate: Coordinate,
    edges: Vec<GraphEdge>,
}

/// Arena-backed planar graph keyed by coordinate. Nodes reference each
/// other by id, never by pointer; identity is exact coordinate equality.
#[derive(Debug, Default)]
struct RingGraph {
    nodes: SlotMap<NodeId, GraphNode>,
    index: HashMap<(u64, u64), NodeId>,
}

impl RingGraph {
    fn intern(&mut self, coordinate: Coordinate) -> NodeId {
        let nodes = &mut self.nodes;
        *self.index.entry(bits(&coordinate)).or_insert_with(|| {
            nodes.insert(GraphNode {
                coordinate,
                edges: Vec::new(),
            })
        })
    }

    /// Add the undirected edge `a`-`b` unless it already exists.
    fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b || self.nodes[a].edges.iter().any(|e| e.to == b) {
            return;
        }
        let ca = self.nodes[a].coordinate;
        let cb = self.nodes[b].coordinate;
        let distance = ca.distance_to(&cb);
        let forward = (cb.y - ca.y).atan2(cb.x - ca.x);
        let backward = (ca.y - cb.y).atan2(ca.x - cb.x);
        self.nodes[a].edges.push(GraphEdge {
            to: b,
            distance,
            angle: forward,
            traversed: false,
        });
        self.nodes[b].edges.push(GraphEdge {
            to: a,
            distance,
            angle: backward,
            traversed: false,
        });
    }

    /// Insert the path of a ring, splitting each edge at the given
    /// cross-ring contact coordinates.
    fn add_ring(&mut self, ring: &LinearRing, splits: &HashMap<usize, Vec<Coordinate>>) {
        let open = ring.open();
        for i in 0..open.len() {
            let a = open[i];
            let b = open[(i + 1) % open.len()];
            let mut chain = vec![a];
            if let Some(on_edge) = splits.get(&i) {
                let mut on_edge: Vec<Coordinate> = on_edge
                    .iter()
                    .filter(|c| **c != a && **c != b)
                    .copied()
                    .collect();
                on_edge.sort_by(|p, q| {
                    a.distance_to(p)
                        .partial_cmp(&a.distance_to(q))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                on_edge.dedup();
                chain.extend(on_edge);
            }
            chain.push(b);
            for pair in chain.windows(2) {
                let from = self.intern(pair[0]);
                let to = self.intern(pair[1]);
                self.connect(from, to);
            }
        }
    }

    /// The node with the lexicographically smallest (y, x) coordinate; it
    /// is guaranteed to lie on the outer boundary of the union.
    fn lowest_node(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .min_by(|(_, a), (_, b)| {
                (a.coordinate.y, a.coordinate.x)
                    .partial_cmp(&(b.coordinate.y, b.coordinate.x))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, _)| id)
    }

    fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.edges.len()).sum()
    }

    /// Pick the untraversed edge with the algebraically largest score:
    /// absolute polar angle on the first step, signed turn relative to the
    /// incoming direction afterwards. Ties within the angular tolerance go
    /// to the shorter edge, so no split point is skipped.
    fn best_edge(
        &self,
        node: NodeId,
        incoming_angle: Option<f64>,
        tolerance: &Tolerance,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64, f64)> = None;
        for (i, edge) in self.nodes[node].edges.iter().enumerate() {
            if edge.traversed {
                continue;
            }
            let score = match incoming_angle {
                None => edge.angle,
                Some(incoming) => normalize_turn(edge.angle - incoming),
            };
            let replace = match best {
                None => true,
                Some((_, best_score, best_distance)) => {
                    if approx::abs_diff_eq!(score, best_score, epsilon = tolerance.angular) {
                        edge.distance < best_distance
                    } else {
                        score > best_score
                    }
                }
            };
            if replace {
                best = Some((i, score, edge.distance));
            }
        }
        best.map(|(i, _, _)| i)
    }

    /// Mark an edge and its reverse as traversed, returning its head and
    /// angle.
    fn consume(&mut self, node: NodeId, edge_index: usize) -> (NodeId, f64) {
        let (to, angle) = {
            let edge = &mut self.nodes[node].edges[edge_index];
            edge.traversed = true;
            (edge.to, edge.angle)
        };
        if let Some(reverse) = self.nodes[to].edges.iter_mut().find(|e| e.to == node) {
            reverse.traversed = true;
        }
        (to, angle)
    }

    /// Trace the outer face starting from the lowest node. Returns `None`
    /// when the walk cannot close, so callers fall back to the unmerged
    /// inputs.
    fn trace_outer(&mut self, tolerance: &Tolerance) -> Option<Vec<Coordinate>> {
        let start = self.lowest_node()?;
        let mut coordinates = vec![self.nodes[start].coordinate];

        let first = self.best_edge(start, None, tolerance)?;
        let (mut current, mut incoming_angle) = self.consume(start, first);

        let limit = self.edge_count() + 2;
        let mut steps = 0;
        while current != start {
            steps += 1;
            if steps > limit {
                return None;
            }
            coordinates.push(self.nodes[current].coordinate);
            let edge = self.best_edge(current, Some(incoming_angle), tolerance)?;
            let (next, angle) = self.consume(current, edge);
            current = next;
            incoming_angle = angle;
        }
        Some(coordinates)
    }
}

/// Wrap an angle difference into `(-π, π]`.
fn normalize_turn(delta: f64) -> f64 {
    let mut turn = delta % TAU;
    if turn <= -PI {
        turn += TAU;
    } else if turn > PI {
        turn -= TAU;
    }
    turn
}

/// Merge two rings that overlap by a positive area into one ring.
///
/// Rings representing holes are wound opposite to shells; they are
/// reversed on the way in and the merged result is re-reversed on the way
/// out. When the rings do not overlap by a positive area the originals are
/// returned unchanged; containment returns only the outer ring. A trace
/// that cannot close also returns the originals; no partial ring is ever
/// emitted.
#[instrument(skip_all)]
pub fn merge_rings(
    first: &LinearRing,
    second: &LinearRing,
    as_holes: bool,
    tolerance: &Tolerance,
) -> Vec<LinearRing> {
    if first.open().len() < 3 || second.open().len() < 3 {
        return vec![first.clone(), second.clone()];
    }

    match ring_relation(first, second, tolerance) {
        RingRelation::Disjoint => {
            return vec![first.clone(), second.clone()];
        }
        RingRelation::FirstInSecond => {
            debug!("first ring contained in second; keeping outer ring");
            return vec![second.clone()];
        }
        RingRelation::SecondInFirst => {
            debug!("second ring contained in first; keeping outer ring");
            return vec![first.clone()];
        }
        RingRelation::Crossing => {}
    }

    let (r1, r2) = if as_holes {
        (first.reversed(), second.reversed())
    } else {
        (first.clone(), second.clone())
    };

    let contacts = ring_contacts(&r1, &r2, tolerance);
    let (splits_first, splits_second) = split_maps(&contacts);

    let mut graph = RingGraph::default();
    graph.add_ring(&r1, &splits_first);
    graph.add_ring(&r2, &splits_second);

    match graph.trace_outer(tolerance) {
        Some(coordinates) if coordinates.len() >= 3 => {
            let merged = LinearRing::new(coordinates);
            if as_holes {
                vec![merged.reversed()]
            } else {
                vec![merged]
            }
        }
        _ => {
            debug!("outer-face trace failed to close; returning inputs unmerged");
            vec![first.clone(), second.clone()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LinearRing {
        LinearRing::new(coords.iter().map(|(x, y)| Coordinate::new(*x, *y)).collect())
    }

    #[test]
    fn test_normalize_turn() {
        assert!((normalize_turn(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_turn(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((normalize_turn(PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_rings_stay_unmerged() {
        let a = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let b = ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 6.0)]);
        let tol = Tolerance::default();
        let merged = merge_rings(&a, &b, false, &tol);
        assert_eq!(merged, vec![a, b]);
    }

    #[test]
    fn test_contained_ring_collapses_to_outer() {
        let outer = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let inner = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let tol = Tolerance::default();
        assert_eq!(merge_rings(&inner, &outer, false, &tol), vec![outer.clone()]);
        assert_eq!(merge_rings(&outer, &inner, false, &tol), vec![outer]);
    }

    #[test]
    fn test_overlapping_squares_union() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let tol = Tolerance::default();
        let merged = merge_rings(&a, &b, false, &tol);
        assert_eq!(merged.len(), 1, "overlapping rings must merge into one");
        // Union area: 4 + 4 - 1.
        assert!((merged[0].signed_area().abs() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_merge_preserves_winding_and_area() {
        // The two overlapping hole candidates from the 4x4-square fixture:
        // the merged hole's area equals the union of the two inputs, with
        // no double subtraction.
        let a = ring(&[(0.5, 0.5), (2.0, 0.5), (2.0, 2.0), (0.5, 2.0)]);
        let b = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let tol = Tolerance::default();
        let merged = merge_rings(&a, &b, true, &tol);
        assert_eq!(merged.len(), 1);
        // 2.25 + 4 - 1 = 5.25
        assert!(
            (merged[0].signed_area().abs() - 5.25).abs() < 1e-9,
            "union area was {}",
            merged[0].signed_area()
        );
        // Hole inputs wound counterclockwise come back counterclockwise.
        assert!(merged[0].signed_area() > 0.0);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let tol = Tolerance::default();
        let once = merge_rings(&a, &b, false, &tol);
        let twice = merge_rings(&a, &b, false, &tol);
        assert_eq!(once, twice);
    }
}
