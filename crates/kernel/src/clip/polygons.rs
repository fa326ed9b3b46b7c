//! Polygon-with-holes intersection.

use tracing::{debug, instrument};

use planar_types::{Coordinate, LinearRing, Polygon};

use super::rings::{ring_difference, ring_intersection};
use super::{
    prune_artifacts, ring_contacts, ring_relation, IntersectionStatus, RingRelation,
};
use crate::graph::merge_rings;
use crate::segment::{Contact, Segment};
use crate::Tolerance;

/// Outcome of a polygon-polygon boolean AND.
#[derive(Debug, Clone, Default)]
pub struct PolygonClip {
    pub polygons: Vec<Polygon>,
    pub lines: Vec<Segment>,
    pub points: Vec<Coordinate>,
    pub status: IntersectionStatus,
}

/// Intersect two polygons with holes.
///
/// The outer rings are clipped first; if any 2-D pieces survive, the
/// holes of both polygons are consolidated into a non-overlapping set and
/// resolved against every piece: a hole inside a piece is attached, a
/// piece inside a hole is discarded keeping only its boundary touches,
/// and a partially overlapping hole is subtracted, possibly splitting the
/// piece.
#[instrument(skip_all)]
pub fn polygon_intersection(
    first: &Polygon,
    second: &Polygon,
    tolerance: &Tolerance,
) -> PolygonClip {
    let outer = ring_intersection(&first.outer, &second.outer, tolerance);
    if outer.polygons.is_empty() {
        return PolygonClip {
            polygons: Vec::new(),
            lines: outer.lines,
            points: outer.points,
            status: outer.status,
        };
    }

    let candidate_holes: Vec<LinearRing> = first
        .holes
        .iter()
        .chain(second.holes.iter())
        .filter(|h| h.open().len() >= 3)
        .cloned()
        .collect();
    let holes = merge_hole_set(candidate_holes, tolerance);

    let mut pieces: Vec<Polygon> = outer.polygons.into_iter().map(Polygon::from_outer).collect();
    let mut points = outer.points;
    let mut lines = outer.lines;

    for hole in &holes {
        let mut next: Vec<Polygon> = Vec::new();
        for piece in pieces {
            match ring_relation(hole, &piece.outer, tolerance) {
                RingRelation::Disjoint => next.push(piece),
                RingRelation::FirstInSecond => {
                    let mut piece = piece;
                    piece.holes.push(hole.clone());
                    next.push(piece);
                }
                RingRelation::SecondInFirst => {
                    // The piece vanishes into the hole; only its touches
                    // with the hole boundary remain.
                    debug!("piece discarded inside a hole");
                    for record in ring_contacts(&piece.outer, hole, tolerance) {
                        match record.contact {
                            Contact::Point(p) => points.push(p),
                            Contact::Overlap(s) => lines.push(s),
                        }
                    }
                }
                RingRelation::Crossing => {
                    let attached = piece.holes;
                    for remainder in ring_difference(&piece.outer, hole, tolerance) {
                        let keep: Vec<LinearRing> = attached
                            .iter()
                            .filter(|h| {
                                ring_relation(h, &remainder, tolerance)
                                    == RingRelation::FirstInSecond
                            })
                            .cloned()
                            .collect();
                        next.push(Polygon::new(remainder, keep));
                    }
                }
            }
        }
        pieces = next;
    }

    let ring_refs: Vec<&LinearRing> = pieces
        .iter()
        .flat_map(|p| std::iter::once(&p.outer).chain(p.holes.iter()))
        .collect();
    let (points, lines) = prune_artifacts(points, lines, &ring_refs, tolerance);

    PolygonClip {
        polygons: pieces,
        lines,
        points,
        status: outer.status,
    }
}

/// Consolidate holes into a minimal non-overlapping set by merging
/// positive-area overlaps pairwise until none remain.
fn merge_hole_set(mut holes: Vec<LinearRing>, tolerance: &Tolerance) -> Vec<LinearRing> {
    loop {
        let mut merged: Option<(usize, usize, LinearRing)> = None;
        'search: for i in 0..holes.len() {
            for j in (i + 1)..holes.len() {
                let mut result = merge_rings(&holes[i], &holes[j], true, tolerance);
                if result.len() == 1 {
                    merged = Some((i, j, result.remove(0)));
                    break 'search;
                }
            }
        }
        match merged {
            Some((i, j, ring)) => {
                holes.swap_remove(j);
                holes.swap_remove(i);
                holes.push(ring);
            }
            None => return holes,
        }
    }
}
