//! Relation accumulators: subject coordinates carrying parent-boundary
//! flags, related to ring, polygon, and multipolygon targets.

use planar_types::{Coordinate, Dimension, Geometry, LinearRing, MultiPolygon, Polygon};

use crate::locate::{multipolygon_location, polygon_location, ring_location};
use crate::relate::IntersectionMatrix;
use crate::segment::{Location, Segment};
use crate::Tolerance;

/// A subject coordinate tagged with whether it is a boundary point of its
/// own parent geometry, so a touch on the target is attributed to the
/// subject's boundary or interior accordingly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectCoordinate {
    pub coordinate: Coordinate,
    pub is_boundary: bool,
}

impl SubjectCoordinate {
    pub fn interior(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            is_boundary: false,
        }
    }

    pub fn boundary(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            is_boundary: true,
        }
    }

    fn facet(&self) -> Location {
        if self.is_boundary {
            Location::Boundary
        } else {
            Location::Interior
        }
    }
}

/// A finite point set never covers a 2-D target: its exterior always meets
/// the target's interior (dimension two) and boundary (dimension one).
fn area_complements(matrix: IntersectionMatrix) -> IntersectionMatrix {
    matrix
        .with(Location::Exterior, Location::Interior, Dimension::Two)
        .with(Location::Exterior, Location::Boundary, Dimension::One)
}

/// Relate one coordinate to the region enclosed by a ring.
pub fn coordinate_related_to_ring(
    subject: SubjectCoordinate,
    ring: &LinearRing,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    if ring.open().len() < 3 {
        return IntersectionMatrix::new();
    }
    let location = ring_location(&subject.coordinate, ring, tolerance);
    area_complements(IntersectionMatrix::new().with(subject.facet(), location, Dimension::Zero))
}

/// Relate a coordinate collection to the region enclosed by a ring.
pub fn coordinates_related_to_ring(
    subjects: &[SubjectCoordinate],
    ring: &LinearRing,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    subjects
        .iter()
        .map(|s| coordinate_related_to_ring(*s, ring, tolerance))
        .fold(IntersectionMatrix::new(), |acc, m| acc.merge(&m))
}

/// Relate one coordinate to a polygon with holes.
pub fn coordinate_related_to_polygon(
    subject: SubjectCoordinate,
    polygon: &Polygon,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    if polygon.is_empty() {
        return IntersectionMatrix::new();
    }
    let location = polygon_location(&subject.coordinate, polygon, tolerance);
    area_complements(IntersectionMatrix::new().with(subject.facet(), location, Dimension::Zero))
}

/// Relate a coordinate collection to a polygon with holes.
pub fn coordinates_related_to_polygon(
    subjects: &[SubjectCoordinate],
    polygon: &Polygon,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    subjects
        .iter()
        .map(|s| coordinate_related_to_polygon(*s, polygon, tolerance))
        .fold(IntersectionMatrix::new(), |acc, m| acc.merge(&m))
}

/// Relate one coordinate to a multipolygon. Being inside any member counts
/// as inside the whole; exterior only when every member reports exterior.
pub fn coordinate_related_to_multipolygon(
    subject: SubjectCoordinate,
    multipolygon: &MultiPolygon,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    if multipolygon.is_empty() {
        return IntersectionMatrix::new();
    }
    let location = multipolygon_location(&subject.coordinate, multipolygon, tolerance);
    area_complements(IntersectionMatrix::new().with(subject.facet(), location, Dimension::Zero))
}

/// Relate a coordinate collection to a multipolygon.
pub fn coordinates_related_to_multipolygon(
    subjects: &[SubjectCoordinate],
    multipolygon: &MultiPolygon,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    subjects
        .iter()
        .map(|s| coordinate_related_to_multipolygon(*s, multipolygon, tolerance))
        .fold(IntersectionMatrix::new(), |acc, m| acc.merge(&m))
}

/// Relate a plain point set to any non-collection target. Returns `None`
/// for targets the accumulator family does not cover.
pub(crate) fn points_related_to(
    coordinates: &[Coordinate],
    target: &Geometry,
    tolerance: &Tolerance,
) -> Option<IntersectionMatrix> {
    match target {
        Geometry::Point(p) => Some(points_vs_points(coordinates, &[p.coordinate])),
        Geometry::MultiPoint(mp) => {
            let targets: Vec<_> = mp.points.iter().map(|p| p.coordinate).collect();
            Some(points_vs_points(coordinates, &targets))
        }
        Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
            Some(points_vs_curve(coordinates, target, tolerance))
        }
        Geometry::Polygon(polygon) => {
            let subjects: Vec<_> = coordinates
                .iter()
                .map(|c| SubjectCoordinate::interior(*c))
                .collect();
            Some(coordinates_related_to_polygon(&subjects, polygon, tolerance))
        }
        Geometry::MultiPolygon(multipolygon) => {
            let subjects: Vec<_> = coordinates
                .iter()
                .map(|c| SubjectCoordinate::interior(*c))
                .collect();
            Some(coordinates_related_to_multipolygon(
                &subjects,
                multipolygon,
                tolerance,
            ))
        }
        Geometry::GeometryCollection(_) => None,
    }
}

fn points_vs_points(subject: &[Coordinate], target: &[Coordinate]) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::new();
    for c in subject {
        let hit = target.contains(c);
        let side = if hit {
            Location::Interior
        } else {
            Location::Exterior
        };
        matrix = matrix.with(Location::Interior, side, Dimension::Zero);
    }
    for t in target {
        if !subject.contains(t) {
            matrix = matrix.with(Location::Exterior, Location::Interior, Dimension::Zero);
        }
    }
    matrix
}

fn points_vs_curve(
    subject: &[Coordinate],
    target: &Geometry,
    tolerance: &Tolerance,
) -> IntersectionMatrix {
    let segments = curve_segments(target);
    if segments.is_empty() {
        let mut matrix = IntersectionMatrix::new();
        for _ in subject {
            matrix = matrix.with(Location::Interior, Location::Exterior, Dimension::Zero);
        }
        return matrix;
    }

    // The curve's boundary under the mod-2 rule, straight from the model.
    let boundary: Vec<Coordinate> = match target.boundary() {
        Geometry::MultiPoint(mp) => mp.points.iter().map(|p| p.coordinate).collect(),
        _ => Vec::new(),
    };

    let mut matrix = IntersectionMatrix::new();
    let mut matched = vec![false; boundary.len()];
    for c in subject {
        if let Some(i) = boundary.iter().position(|b| b == c) {
            matched[i] = true;
            matrix = matrix.with(Location::Interior, Location::Boundary, Dimension::Zero);
            continue;
        }
        let on_curve = segments
            .iter()
            .any(|s| s.location_of(c, tolerance) != Location::Exterior);
        let side = if on_curve {
            Location::Interior
        } else {
            Location::Exterior
        };
        matrix = matrix.with(Location::Interior, side, Dimension::Zero);
    }

    // A finite point set never covers a 1-D curve.
    matrix = matrix.with(Location::Exterior, Location::Interior, Dimension::One);
    if matched.iter().any(|m| !m) {
        matrix = matrix.with(Location::Exterior, Location::Boundary, Dimension::Zero);
    }
    matrix
}

/// The segments of a 1-D geometry, ring closure included.
pub(crate) fn curve_segments(geometry: &Geometry) -> Vec<Segment> {
    match geometry {
        Geometry::LineString(ls) => ls
            .coordinates
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect(),
        Geometry::LinearRing(ring) => ring
            .coordinates
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect(),
        Geometry::MultiLineString(mls) => mls
            .line_strings
            .iter()
            .flat_map(|ls| ls.coordinates.windows(2).map(|w| Segment::new(w[0], w[1])))
            .collect(),
        _ => Vec::new(),
    }
}
