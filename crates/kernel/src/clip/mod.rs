//! Polygon clipping: boolean traces over augmented ring pairs, and
//! polygon-with-holes intersection.
//!
//! The shared machinery here (pairwise edge contacts, augmented vertex
//! lists, ring-relation classification, artifact pruning) backs both the
//! ring-level booleans in `rings` and the hole resolution in `polygons`,
//! and the planar-graph merger reuses the contact scan.

mod polygons;
mod rings;

pub use polygons::{polygon_intersection, PolygonClip};
pub use rings::{ring_difference, ring_intersection, RingClip};

use std::collections::{HashMap, HashSet};

use planar_types::{Coordinate, LinearRing};

use crate::locate::ring_location;
use crate::segment::{intersect, BoundaryFlags, Contact, Location, Segment};
use crate::Tolerance;

/// Fast-path signal: whether either ring lies wholly within the closed
/// region of the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntersectionStatus {
    pub first_inside_second: bool,
    pub second_inside_first: bool,
}

/// A pairwise segment contact between two rings, keyed by the edge
/// indices that produced it.
#[derive(Debug, Clone)]
pub(crate) struct ContactRecord {
    pub first_edge: usize,
    pub second_edge: usize,
    pub contact: Contact,
}

pub(crate) fn bits(c: &Coordinate) -> (u64, u64) {
    (c.x.to_bits(), c.y.to_bits())
}

pub(crate) fn ring_edge(ring: &LinearRing, i: usize) -> Segment {
    let open = ring.open();
    Segment::new(open[i], open[(i + 1) % open.len()])
}

/// All pairwise contacts between the edges of two rings. Ring edges carry
/// no curve-boundary endpoints.
pub(crate) fn ring_contacts(
    first: &LinearRing,
    second: &LinearRing,
    tolerance: &Tolerance,
) -> Vec<ContactRecord> {
    let mut records = Vec::new();
    for i in 0..first.open().len() {
        let a = ring_edge(first, i);
        for j in 0..second.open().len() {
            let b = ring_edge(second, j);
            let result = intersect(&a, &b, BoundaryFlags::none(), tolerance);
            if let Some(contact) = result.contact {
                records.push(ContactRecord {
                    first_edge: i,
                    second_edge: j,
                    contact,
                });
            }
        }
    }
    records
}

/// Per-edge insertion maps for both rings of a contact scan.
pub(crate) fn split_maps(
    records: &[ContactRecord],
) -> (
    HashMap<usize, Vec<Coordinate>>,
    HashMap<usize, Vec<Coordinate>>,
) {
    let mut first: HashMap<usize, Vec<Coordinate>> = HashMap::new();
    let mut second: HashMap<usize, Vec<Coordinate>> = HashMap::new();
    for record in records {
        let coords = match &record.contact {
            Contact::Point(p) => vec![*p],
            Contact::Overlap(s) => vec![s.left, s.right],
        };
        for c in coords {
            first.entry(record.first_edge).or_default().push(c);
            second.entry(record.second_edge).or_default().push(c);
        }
    }
    (first, second)
}

/// A vertex of an augmented ring: an original vertex or an inserted
/// cross-ring intersection point, tagged with the location (relative to
/// the other ring) of the arc that leaves it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AugVertex {
    pub coordinate: Coordinate,
    pub is_intersection: bool,
    pub arc_location: Location,
}

impl AugVertex {
    /// The arc leaving this vertex enters the other ring's interior.
    pub fn is_inbound(&self) -> bool {
        self.is_intersection && self.arc_location == Location::Interior
    }
}

/// Build the augmented vertex list of `ring`: its original vertices with
/// every cross-ring intersection inserted at its arc-length position.
///
/// Arcs never cross the other ring (they are split at every contact), so
/// the midpoint of an arc classifies the whole arc.
pub(crate) fn augment(
    ring: &LinearRing,
    splits: &HashMap<usize, Vec<Coordinate>>,
    other: &LinearRing,
    tolerance: &Tolerance,
) -> Vec<AugVertex> {
    let open = ring.open();
    let mut intersections: HashSet<(u64, u64)> = HashSet::new();
    for coords in splits.values() {
        for c in coords {
            intersections.insert(bits(c));
        }
    }

    let mut coordinates: Vec<Coordinate> = Vec::new();
    for i in 0..open.len() {
        let a = open[i];
        let b = open[(i + 1) % open.len()];
        coordinates.push(a);
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
            coordinates.extend(on_edge);
        }
    }
    coordinates.dedup();

    let n = coordinates.len();
    (0..n)
        .map(|k| {
            let c = coordinates[k];
            let next = coordinates[(k + 1) % n];
            let midpoint = c.midpoint(&next);
            AugVertex {
                coordinate: c,
                is_intersection: intersections.contains(&bits(&c)),
                arc_location: ring_location(&midpoint, other, tolerance),
            }
        })
        .collect()
}

/// How the closed regions of two simple rings relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RingRelation {
    /// The boundaries genuinely cross.
    Crossing,
    /// The first ring lies in the closed region of the second, boundary
    /// sharing included.
    FirstInSecond,
    /// The second ring lies in the closed region of the first.
    SecondInFirst,
    /// The interiors are disjoint; boundaries may still touch.
    Disjoint,
}

pub(crate) fn ring_relation(
    first: &LinearRing,
    second: &LinearRing,
    tolerance: &Tolerance,
) -> RingRelation {
    if first.open().len() < 3 || second.open().len() < 3 {
        return RingRelation::Disjoint;
    }
    let contacts = ring_contacts(first, second, tolerance);
    let (splits_first, splits_second) = split_maps(&contacts);
    let aug_first = augment(first, &splits_first, second, tolerance);
    let aug_second = augment(second, &splits_second, first, tolerance);
    relation_from_augmented(&aug_first, &aug_second)
}

pub(crate) fn relation_from_augmented(
    aug_first: &[AugVertex],
    aug_second: &[AugVertex],
) -> RingRelation {
    let has = |aug: &[AugVertex], location: Location| {
        aug.iter().any(|v| v.arc_location == location)
    };
    let first_inside = has(aug_first, Location::Interior);
    let first_outside = has(aug_first, Location::Exterior);
    let second_inside = has(aug_second, Location::Interior);
    let second_outside = has(aug_second, Location::Exterior);

    if (first_inside && first_outside) || (second_inside && second_outside) {
        return RingRelation::Crossing;
    }
    if !first_outside {
        return RingRelation::FirstInSecond;
    }
    if !second_outside {
        return RingRelation::SecondInFirst;
    }
    RingRelation::Disjoint
}

pub(crate) fn on_ring_boundary(c: &Coordinate, ring: &LinearRing, tolerance: &Tolerance) -> bool {
    let open = ring.open();
    (0..open.len()).any(|i| ring_edge(ring, i).location_of(c, tolerance) != Location::Exterior)
}

/// Drop artifact lines that run along a result ring, then artifact points
/// covered by a surviving line or a result ring, deduplicating exact
/// repeats along the way.
pub(crate) fn prune_artifacts(
    points: Vec<Coordinate>,
    lines: Vec<Segment>,
    rings: &[&LinearRing],
    tolerance: &Tolerance,
) -> (Vec<Coordinate>, Vec<Segment>) {
    let mut kept_lines: Vec<Segment> = Vec::new();
    for line in lines {
        let covered = rings.iter().any(|ring| {
            on_ring_boundary(&line.left, ring, tolerance)
                && on_ring_boundary(&line.midpoint(), ring, tolerance)
                && on_ring_boundary(&line.right, ring, tolerance)
        });
        let duplicate = kept_lines.iter().any(|l| {
            (l.left == line.left && l.right == line.right)
                || (l.left == line.right && l.right == line.left)
        });
        if !covered && !duplicate {
            kept_lines.push(line);
        }
    }

    let mut kept_points: Vec<Coordinate> = Vec::new();
    for p in points {
        let on_line = kept_lines
            .iter()
            .any(|l| l.location_of(&p, tolerance) != Location::Exterior);
        let on_ring = rings.iter().any(|ring| on_ring_boundary(&p, ring, tolerance));
        if !on_line && !on_ring && !kept_points.contains(&p) {
            kept_points.push(p);
        }
    }
    (kept_points, kept_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LinearRing {
        LinearRing::new(coords.iter().map(|(x, y)| Coordinate::new(*x, *y)).collect())
    }

    #[test]
    fn test_ring_relation_containment() {
        let outer = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let inner = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let tol = Tolerance::default();
        assert_eq!(ring_relation(&inner, &outer, &tol), RingRelation::FirstInSecond);
        assert_eq!(ring_relation(&outer, &inner, &tol), RingRelation::SecondInFirst);
    }

    #[test]
    fn test_ring_relation_identical_is_containment() {
        let r = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let tol = Tolerance::default();
        assert_eq!(ring_relation(&r, &r.clone(), &tol), RingRelation::FirstInSecond);
    }

    #[test]
    fn test_ring_relation_crossing_and_disjoint() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let c = ring(&[(10.0, 10.0), (12.0, 10.0), (12.0, 12.0), (10.0, 12.0)]);
        let tol = Tolerance::default();
        assert_eq!(ring_relation(&a, &b, &tol), RingRelation::Crossing);
        assert_eq!(ring_relation(&a, &c, &tol), RingRelation::Disjoint);
    }

    #[test]
    fn test_edge_sharing_squares_are_disjoint_regions() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(2.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0)]);
        let tol = Tolerance::default();
        assert_eq!(ring_relation(&a, &b, &tol), RingRelation::Disjoint);
    }

    #[test]
    fn test_augment_inserts_and_tags() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let tol = Tolerance::default();
        let contacts = ring_contacts(&a, &b, &tol);
        let (splits_first, _) = split_maps(&contacts);
        let aug = augment(&a, &splits_first, &b, &tol);

        // The right and top edges of `a` each gain one crossing vertex.
        assert_eq!(aug.len(), 6);
        let inbound: Vec<Coordinate> = aug
            .iter()
            .filter(|v| v.is_inbound())
            .map(|v| v.coordinate)
            .collect();
        assert_eq!(inbound, vec![Coordinate::new(2.0, 1.0)]);
    }

    #[test]
    fn test_prune_artifacts_subsumption() {
        let square = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let tol = Tolerance::default();
        let points = vec![
            Coordinate::new(2.0, 0.0),  // on the square boundary
            Coordinate::new(7.0, 7.5),  // on the free-standing line
            Coordinate::new(9.0, 9.0),  // survives
            Coordinate::new(9.0, 9.0),  // duplicate
        ];
        let lines = vec![
            Segment::new(Coordinate::new(1.0, 0.0), Coordinate::new(3.0, 0.0)), // on boundary
            Segment::new(Coordinate::new(7.0, 7.0), Coordinate::new(7.0, 8.0)), // survives
        ];
        let (points, lines) = prune_artifacts(points, lines, &[&square], &tol);
        assert_eq!(lines.len(), 1);
        assert_eq!(points, vec![Coordinate::new(9.0, 9.0)]);
    }
}
