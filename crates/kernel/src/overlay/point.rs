//! Zero-dimensional intersections: membership filtering of point sets.

use planar_types::{Coordinate, Geometry, MultiPoint};

use crate::locate::{multipolygon_location, polygon_location};
use crate::relate::accumulate::curve_segments;
use crate::segment::Location;
use crate::Tolerance;

/// Keep the points contained in `other` (boundary and interior both
/// count), deduplicated, as a MultiPoint, or the empty collection.
pub(crate) fn point_intersection(
    points: &[Coordinate],
    other: &Geometry,
    tolerance: &Tolerance,
) -> Geometry {
    let mut kept: Vec<Coordinate> = Vec::new();
    for c in points {
        if contains_coordinate(other, c, tolerance) && !kept.contains(c) {
            kept.push(*c);
        }
    }
    if kept.is_empty() {
        Geometry::empty()
    } else {
        Geometry::MultiPoint(MultiPoint::from_coordinates(kept))
    }
}

/// Membership of a coordinate in a geometry's closed point set.
pub(crate) fn contains_coordinate(
    geometry: &Geometry,
    c: &Coordinate,
    tolerance: &Tolerance,
) -> bool {
    match geometry {
        Geometry::Point(p) => p.coordinate == *c,
        Geometry::MultiPoint(mp) => mp.points.iter().any(|p| p.coordinate == *c),
        Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
            curve_segments(geometry)
                .iter()
                .any(|s| s.location_of(c, tolerance) != Location::Exterior)
        }
        Geometry::Polygon(p) => polygon_location(c, p, tolerance) != Location::Exterior,
        Geometry::MultiPolygon(mp) => multipolygon_location(c, mp, tolerance) != Location::Exterior,
        Geometry::GeometryCollection(gc) => {
            gc.iter().any(|g| contains_coordinate(g, c, tolerance))
        }
    }
}
