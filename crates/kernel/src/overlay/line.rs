//! One-dimensional intersections: curve × curve and curve × area.

use planar_types::{
    Coordinate, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon,
};

use super::assemble;
use crate::locate::polygon_location;
use crate::relate::accumulate::curve_segments;
use crate::segment::{intersect, BoundaryFlags, Contact, Location, Segment};
use crate::Tolerance;

/// Segments of a curve tagged with whether each endpoint belongs to the
/// curve's boundary (mod-2 rule for multi-curves).
fn tagged_segments(geometry: &Geometry) -> Vec<(Segment, bool, bool)> {
    let boundary: Vec<Coordinate> = match geometry.boundary() {
        Geometry::MultiPoint(mp) => mp.points.iter().map(|p| p.coordinate).collect(),
        _ => Vec::new(),
    };
    curve_segments(geometry)
        .into_iter()
        .map(|s| {
            let left = boundary.contains(&s.left);
            let right = boundary.contains(&s.right);
            (s, left, right)
        })
        .collect()
}

/// Pairwise-classify every segment of one curve against every segment of
/// the other; overlaps become maximal line strings, touch points not
/// subsumed by an overlap become points.
pub(crate) fn line_line(first: &Geometry, second: &Geometry, tolerance: &Tolerance) -> Geometry {
    let first_segments = tagged_segments(first);
    let second_segments = tagged_segments(second);

    let mut touch_points: Vec<Coordinate> = Vec::new();
    let mut overlaps: Vec<Segment> = Vec::new();
    for (a, a_left, a_right) in &first_segments {
        for (b, b_left, b_right) in &second_segments {
            let flags = BoundaryFlags {
                first_left: *a_left,
                first_right: *a_right,
                second_left: *b_left,
                second_right: *b_right,
            };
            match intersect(a, b, flags, tolerance).contact {
                Some(Contact::Point(p)) => touch_points.push(p),
                Some(Contact::Overlap(s)) => overlaps.push(s),
                None => {}
            }
        }
    }

    let points = prune_points(touch_points, &overlaps, tolerance);
    let lines = coalesce(overlaps);
    assemble(
        MultiPoint::from_coordinates(points),
        lines,
        MultiPolygon::default(),
    )
}

/// Clip a curve against a polygonal region: split every segment at its
/// ring contacts, keep the sub-segments whose midpoints lie in the closed
/// region, and demote isolated boundary touches to points.
pub(crate) fn line_area(line: &Geometry, area: &Geometry, tolerance: &Tolerance) -> Geometry {
    let polygons: Vec<&Polygon> = match area {
        Geometry::Polygon(p) => vec![p],
        Geometry::MultiPolygon(mp) => mp.polygons.iter().collect(),
        _ => Vec::new(),
    };

    let mut kept: Vec<Segment> = Vec::new();
    let mut touch_points: Vec<Coordinate> = Vec::new();

    for segment in curve_segments(line) {
        let mut cuts: Vec<Coordinate> = vec![segment.left, segment.right];
        for polygon in &polygons {
            for ring in std::iter::once(&polygon.outer).chain(polygon.holes.iter()) {
                let open = ring.open();
                for i in 0..open.len() {
                    let edge = Segment::new(open[i], open[(i + 1) % open.len()]);
                    match intersect(&segment, &edge, BoundaryFlags::none(), tolerance).contact {
                        Some(Contact::Point(p)) => {
                            touch_points.push(p);
                            cuts.push(p);
                        }
                        Some(Contact::Overlap(s)) => {
                            cuts.push(s.left);
                            cuts.push(s.right);
                        }
                        None => {}
                    }
                }
            }
        }

        cuts.sort_by(|p, q| {
            segment
                .left
                .distance_to(p)
                .partial_cmp(&segment.left.distance_to(q))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        cuts.dedup();

        for pair in cuts.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                continue;
            }
            let midpoint = a.midpoint(&b);
            if area_location(&midpoint, &polygons, tolerance) != Location::Exterior {
                kept.push(Segment::new(a, b));
            }
        }
    }

    let points = prune_points(touch_points, &kept, tolerance);
    let lines = coalesce(kept);
    assemble(
        MultiPoint::from_coordinates(points),
        lines,
        MultiPolygon::default(),
    )
}

fn area_location(c: &Coordinate, polygons: &[&Polygon], tolerance: &Tolerance) -> Location {
    let mut on_boundary = false;
    for polygon in polygons {
        match polygon_location(c, polygon, tolerance) {
            Location::Interior => return Location::Interior,
            Location::Boundary => on_boundary = true,
            Location::Exterior => {}
        }
    }
    if on_boundary {
        Location::Boundary
    } else {
        Location::Exterior
    }
}

/// Drop touch points already covered by a collected segment, then exact
/// duplicates.
fn prune_points(
    points: Vec<Coordinate>,
    segments: &[Segment],
    tolerance: &Tolerance,
) -> Vec<Coordinate> {
    let mut kept: Vec<Coordinate> = Vec::new();
    for p in points {
        let covered = segments
            .iter()
            .any(|s| s.location_of(&p, tolerance) != Location::Exterior);
        if !covered && !kept.contains(&p) {
            kept.push(p);
        }
    }
    kept
}

/// Join collected segments into maximal line strings by chaining shared
/// endpoints, deduplicating identical segments first.
pub(crate) fn coalesce(segments: Vec<Segment>) -> MultiLineString {
    let mut remaining: Vec<Segment> = Vec::new();
    for s in segments {
        let duplicate = remaining.iter().any(|r| {
            (r.left == s.left && r.right == s.right) || (r.left == s.right && r.right == s.left)
        });
        if !duplicate {
            remaining.push(s);
        }
    }

    let mut line_strings: Vec<LineString> = Vec::new();
    while !remaining.is_empty() {
        let seed = remaining.remove(0);
        let mut chain: Vec<Coordinate> = vec![seed.left, seed.right];
        loop {
            let back = *chain.last().expect("chain is never empty");
            let front = chain[0];
            let next = remaining.iter().position(|s| {
                s.left == back || s.right == back || s.left == front || s.right == front
            });
            match next {
                Some(i) => {
                    let s = remaining.remove(i);
                    if s.left == back {
                        chain.push(s.right);
                    } else if s.right == back {
                        chain.push(s.left);
                    } else if s.left == front {
                        chain.insert(0, s.right);
                    } else {
                        chain.insert(0, s.left);
                    }
                }
                None => break,
            }
        }
        line_strings.push(LineString::new(chain));
    }
    MultiLineString::new(line_strings)
}
