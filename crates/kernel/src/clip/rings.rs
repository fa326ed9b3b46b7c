//! Ring-ring boolean operations: intersection and difference of the
//! closed regions bounded by two simple rings.

use std::collections::HashSet;

use tracing::{debug, instrument};

use planar_types::{Coordinate, LinearRing};

use super::{
    augment, bits, prune_artifacts, relation_from_augmented, ring_contacts, split_maps,
    AugVertex, ContactRecord, IntersectionStatus, RingRelation,
};
use crate::segment::{Contact, Location, Segment};
use crate::Tolerance;

/// Outcome of a ring-ring boolean AND: the result rings plus the point and
/// line artifacts where the boundaries merely touch.
#[derive(Debug, Clone, Default)]
pub struct RingClip {
    pub polygons: Vec<LinearRing>,
    pub lines: Vec<Segment>,
    pub points: Vec<Coordinate>,
    pub status: IntersectionStatus,
}

fn artifacts(records: &[ContactRecord]) -> (Vec<Coordinate>, Vec<Segment>) {
    let mut points = Vec::new();
    let mut lines = Vec::new();
    for record in records {
        match record.contact {
            Contact::Point(p) => points.push(p),
            Contact::Overlap(s) => lines.push(s),
        }
    }
    (points, lines)
}

/// Intersection of the closed regions bounded by two simple rings.
///
/// Containment (boundary sharing included) short-circuits to the inner
/// ring; disjoint interiors yield only touch artifacts; genuinely crossing
/// rings are traced Weiler–Atherton style over their augmented vertex
/// lists.
#[instrument(skip_all)]
pub fn ring_intersection(
    first: &LinearRing,
    second: &LinearRing,
    tolerance: &Tolerance,
) -> RingClip {
    if first.open().len() < 3 || second.open().len() < 3 {
        return RingClip::default();
    }

    let contacts = ring_contacts(first, second, tolerance);
    let (raw_points, raw_lines) = artifacts(&contacts);
    let (splits_first, splits_second) = split_maps(&contacts);
    let aug_first = augment(first, &splits_first, second, tolerance);
    let aug_second = augment(second, &splits_second, first, tolerance);

    let status = IntersectionStatus {
        first_inside_second: !aug_first
            .iter()
            .any(|v| v.arc_location == Location::Exterior),
        second_inside_first: !aug_second
            .iter()
            .any(|v| v.arc_location == Location::Exterior),
    };

    let polygons = match relation_from_augmented(&aug_first, &aug_second) {
        RingRelation::FirstInSecond => vec![first.clone()],
        RingRelation::SecondInFirst => vec![second.clone()],
        RingRelation::Disjoint => Vec::new(),
        RingRelation::Crossing => {
            let inbound_first: Vec<bool> = aug_first.iter().map(AugVertex::is_inbound).collect();
            let inbound_second: Vec<bool> =
                aug_second.iter().map(AugVertex::is_inbound).collect();
            trace_pieces(&aug_first, &aug_second, &inbound_first, &inbound_second)
        }
    };
    debug!(pieces = polygons.len(), "ring intersection traced");

    let ring_refs: Vec<&LinearRing> = polygons.iter().collect();
    let (points, lines) = prune_artifacts(raw_points, raw_lines, &ring_refs, tolerance);

    RingClip {
        polygons,
        lines,
        points,
        status,
    }
}

/// Subtract the open region bounded by `clip` from the closed region
/// bounded by `subject`, returning the remaining pieces.
///
/// Only genuinely crossing pairs split; when nothing of the subject lies
/// inside the clip the subject comes back unchanged, and a swallowed
/// subject yields nothing. A clip ring wholly inside the subject is the
/// caller's hole-attachment case, not a subtraction.
#[instrument(skip_all)]
pub fn ring_difference(
    subject: &LinearRing,
    clip: &LinearRing,
    tolerance: &Tolerance,
) -> Vec<LinearRing> {
    if subject.open().len() < 3 {
        return Vec::new();
    }
    if clip.open().len() < 3 {
        return vec![subject.clone()];
    }

    // Walking the clip ring backwards keeps the traced boundary
    // orientation consistent with the subject's.
    let clip_reversed = clip.reversed();
    let contacts = ring_contacts(subject, &clip_reversed, tolerance);
    let (splits_subject, splits_clip) = split_maps(&contacts);
    let aug_subject = augment(subject, &splits_subject, &clip_reversed, tolerance);
    let aug_clip = augment(&clip_reversed, &splits_clip, subject, tolerance);

    let subject_has_interior = aug_subject
        .iter()
        .any(|v| v.arc_location == Location::Interior);
    let subject_has_exterior = aug_subject
        .iter()
        .any(|v| v.arc_location == Location::Exterior);
    if !subject_has_interior {
        return vec![subject.clone()];
    }
    if !subject_has_exterior {
        return Vec::new();
    }

    // Keep subject arcs outside the clip interior; walk clip arcs that run
    // through the subject.
    let keep_subject: Vec<bool> = aug_subject
        .iter()
        .map(|v| v.is_intersection && v.arc_location != Location::Interior)
        .collect();
    let keep_clip: Vec<bool> = aug_clip
        .iter()
        .map(|v| v.is_intersection && v.arc_location == Location::Interior)
        .collect();
    trace_pieces(&aug_subject, &aug_clip, &keep_subject, &keep_clip)
}

/// Walk the two augmented rings: stay on the current ring while its
/// vertices chain inbound, jump to the matching vertex on the other ring
/// at every non-inbound intersection vertex, and close when the start
/// coordinate recurs. One closed piece is emitted per start vertex not
/// consumed by an earlier trace; a walk that cannot close is discarded.
fn trace_pieces(
    aug_first: &[AugVertex],
    aug_second: &[AugVertex],
    inbound_first: &[bool],
    inbound_second: &[bool],
) -> Vec<LinearRing> {
    let rings = [aug_first, aug_second];
    let inbound = [inbound_first, inbound_second];
    let mut consumed: HashSet<(u64, u64)> = HashSet::new();
    let mut pieces = Vec::new();
    let limit = (aug_first.len() + aug_second.len()) * 2 + 4;

    for start in 0..aug_first.len() {
        if !inbound_first[start] || consumed.contains(&bits(&aug_first[start].coordinate)) {
            continue;
        }
        let start_coordinate = aug_first[start].coordinate;
        let mut coordinates = vec![start_coordinate];
        consumed.insert(bits(&start_coordinate));

        let mut ring = 0usize;
        let mut idx = start;
        let mut closed = false;
        for _ in 0..limit {
            idx = (idx + 1) % rings[ring].len();
            let vertex = rings[ring][idx];
            if vertex.coordinate == start_coordinate {
                closed = true;
                break;
            }
            coordinates.push(vertex.coordinate);
            if vertex.is_intersection {
                consumed.insert(bits(&vertex.coordinate));
                if !inbound[ring][idx] {
                    let other = 1 - ring;
                    if let Some(j) = rings[other]
                        .iter()
                        .position(|w| w.coordinate == vertex.coordinate)
                    {
                        ring = other;
                        idx = j;
                    }
                }
            }
        }

        if closed && coordinates.len() >= 3 {
            pieces.push(LinearRing::new(coordinates));
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LinearRing {
        LinearRing::new(coords.iter().map(|(x, y)| Coordinate::new(*x, *y)).collect())
    }

    fn ring_congruent(actual: &LinearRing, expected: &[(f64, f64)]) -> bool {
        let open = actual.open();
        if open.len() != expected.len() {
            return false;
        }
        let expected: Vec<Coordinate> = expected
            .iter()
            .map(|(x, y)| Coordinate::new(*x, *y))
            .collect();
        // Same cyclic order, either direction, any starting offset.
        for direction in [false, true] {
            let candidate: Vec<Coordinate> = if direction {
                let mut v = open.to_vec();
                v.reverse();
                v
            } else {
                open.to_vec()
            };
            for offset in 0..candidate.len() {
                if (0..candidate.len()).all(|k| candidate[(offset + k) % candidate.len()] == expected[k])
                {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn test_overlapping_squares() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(1.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 2.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&a, &b, &tol);
        assert_eq!(clip.polygons.len(), 1);
        assert!(
            ring_congruent(&clip.polygons[0], &[(1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1.0, 2.0)]),
            "got {:?}",
            clip.polygons[0]
        );
        // The overlapping boundary pieces are part of the result polygon,
        // not separate artifacts.
        assert!(clip.lines.is_empty());
        assert!(clip.points.is_empty());
        assert!(!clip.status.first_inside_second);
    }

    #[test]
    fn test_identical_rings() {
        let a = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&a, &a.clone(), &tol);
        assert_eq!(clip.polygons, vec![a]);
        assert!(clip.status.first_inside_second);
        assert!(clip.status.second_inside_first);
    }

    #[test]
    fn test_contained_ring() {
        let outer = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let inner = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&inner, &outer, &tol);
        assert_eq!(clip.polygons, vec![inner.clone()]);
        assert!(clip.status.first_inside_second);
        assert!(!clip.status.second_inside_first);
    }

    #[test]
    fn test_disjoint_rings() {
        let a = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let b = ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 6.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&a, &b, &tol);
        assert!(clip.polygons.is_empty());
        assert!(clip.points.is_empty());
        assert!(clip.lines.is_empty());
    }

    #[test]
    fn test_edge_sharing_squares_touch_as_line() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(2.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&a, &b, &tol);
        assert!(clip.polygons.is_empty());
        assert_eq!(clip.lines.len(), 1, "shared edge should surface as a line");
        let line = clip.lines[0];
        let mut ys = [line.left.y, line.right.y];
        ys.sort_by(|p, q| p.partial_cmp(q).unwrap());
        assert_eq!(line.left.x, 2.0);
        assert_eq!(line.right.x, 2.0);
        assert_eq!(ys, [0.0, 2.0]);
    }

    #[test]
    fn test_corner_touching_squares_touch_as_point() {
        let a = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&a, &b, &tol);
        assert!(clip.polygons.is_empty());
        assert!(clip.lines.is_empty());
        assert_eq!(clip.points, vec![Coordinate::new(2.0, 2.0)]);
    }

    #[test]
    fn test_cross_shape_two_pieces() {
        // A wide bar and a tall bar crossing: their intersection is one
        // central square; a U-shaped subject against a bar splits below.
        let wide = ring(&[(0.0, 2.0), (6.0, 2.0), (6.0, 4.0), (0.0, 4.0)]);
        let tall = ring(&[(2.0, 0.0), (4.0, 0.0), (4.0, 6.0), (2.0, 6.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&wide, &tall, &tol);
        assert_eq!(clip.polygons.len(), 1);
        assert!(ring_congruent(
            &clip.polygons[0],
            &[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)]
        ));
    }

    #[test]
    fn test_u_shape_against_bar_gives_two_pieces() {
        // A U-shaped ring and a horizontal bar across its two prongs.
        let u = ring(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 4.0),
            (4.0, 4.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0),
        ]);
        let bar = ring(&[(0.0, 2.0), (5.0, 2.0), (5.0, 3.0), (0.0, 3.0)]);
        let tol = Tolerance::default();
        let clip = ring_intersection(&u, &bar, &tol);
        assert_eq!(clip.polygons.len(), 2, "each prong contributes a piece");
        let mut areas: Vec<f64> = clip
            .polygons
            .iter()
            .map(|p| p.signed_area().abs())
            .collect();
        areas.sort_by(|p, q| p.partial_cmp(q).unwrap());
        assert!((areas[0] - 1.0).abs() < 1e-9);
        assert!((areas[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_notch() {
        // Subtract a notch that overlaps the bottom edge of a square.
        let subject = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let notch = ring(&[(1.0, -1.0), (3.0, -1.0), (3.0, 1.0), (1.0, 1.0)]);
        let tol = Tolerance::default();
        let pieces = ring_difference(&subject, &notch, &tol);
        assert_eq!(pieces.len(), 1);
        assert!(
            ring_congruent(
                &pieces[0],
                &[
                    (0.0, 0.0),
                    (1.0, 0.0),
                    (1.0, 1.0),
                    (3.0, 1.0),
                    (3.0, 0.0),
                    (4.0, 0.0),
                    (4.0, 4.0),
                    (0.0, 4.0)
                ]
            ),
            "got {:?}",
            pieces[0]
        );
    }

    #[test]
    fn test_difference_splits_subject() {
        // A bar crossing the whole square splits it into two pieces.
        let subject = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let bar = ring(&[(-1.0, 1.0), (5.0, 1.0), (5.0, 3.0), (-1.0, 3.0)]);
        let tol = Tolerance::default();
        let pieces = ring_difference(&subject, &bar, &tol);
        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(|p| p.signed_area().abs()).sum();
        assert!((total - 8.0).abs() < 1e-9, "total area was {total}");
    }

    #[test]
    fn test_difference_disjoint_keeps_subject() {
        let subject = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let far = ring(&[(10.0, 10.0), (11.0, 10.0), (11.0, 11.0), (10.0, 11.0)]);
        let tol = Tolerance::default();
        assert_eq!(ring_difference(&subject, &far, &tol), vec![subject]);
    }

    #[test]
    fn test_difference_swallowed_subject_is_empty() {
        let subject = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let clip = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let tol = Tolerance::default();
        assert!(ring_difference(&subject, &clip, &tol).is_empty());
    }
}
