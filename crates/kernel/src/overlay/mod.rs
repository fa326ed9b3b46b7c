//! The dimension-pair dispatcher: set-theoretic intersection over every
//! supported geometry pair.
//!
//! Results are assembled into the canonical {MultiPoint, MultiLineString,
//! MultiPolygon} parts; an empty result is always the empty collection,
//! never null, and unsupported operands surface a typed error instead of a
//! silent empty.

mod area;
mod line;
mod point;

use thiserror::Error;

use planar_types::{
    Coordinate, Geometry, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon,
};

use crate::Tolerance;

/// Failure surfaced for operand combinations the engine does not support.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("{operation} is not implemented for {first} × {second}")]
    NotImplemented {
        operation: &'static str,
        first: &'static str,
        second: &'static str,
    },
}

/// Set-theoretic intersection of two geometries under the default
/// tolerance.
pub fn intersection(first: &Geometry, second: &Geometry) -> Result<Geometry, OverlayError> {
    intersection_with(first, second, &crate::default_tolerance())
}

/// Set-theoretic intersection under an explicit tolerance.
pub fn intersection_with(
    first: &Geometry,
    second: &Geometry,
    tolerance: &Tolerance,
) -> Result<Geometry, OverlayError> {
    use Geometry as G;

    if matches!(first, G::GeometryCollection(_)) || matches!(second, G::GeometryCollection(_)) {
        return Err(OverlayError::NotImplemented {
            operation: "intersection",
            first: first.type_name(),
            second: second.type_name(),
        });
    }

    // Duplicate and colinear vertices never change the result; dropping
    // them up front bounds the pairwise loops.
    let first = first.simplify(tolerance.coincidence);
    let second = second.simplify(tolerance.coincidence);

    if first.is_empty() || second.is_empty() {
        return Ok(Geometry::empty());
    }
    if let (Some(a), Some(b)) = (first.bounds(), second.bounds()) {
        if !a.expanded(tolerance.coincidence).intersects(&b) {
            return Ok(Geometry::empty());
        }
    }

    let result = match (&first, &second) {
        // Collections were rejected above; simplify preserves variants.
        (G::GeometryCollection(_), _) | (_, G::GeometryCollection(_)) => {
            return Err(OverlayError::NotImplemented {
                operation: "intersection",
                first: first.type_name(),
                second: second.type_name(),
            })
        }
        (G::Point(_) | G::MultiPoint(_), _) => {
            point::point_intersection(&point_coordinates(&first), &second, tolerance)
        }
        (_, G::Point(_) | G::MultiPoint(_)) => {
            point::point_intersection(&point_coordinates(&second), &first, tolerance)
        }
        (
            G::Polygon(_) | G::MultiPolygon(_),
            G::Polygon(_) | G::MultiPolygon(_),
        ) => area::area_area(&first, &second, tolerance),
        (
            G::LineString(_) | G::LinearRing(_) | G::MultiLineString(_),
            G::Polygon(_) | G::MultiPolygon(_),
        ) => line::line_area(&first, &second, tolerance),
        (
            G::Polygon(_) | G::MultiPolygon(_),
            G::LineString(_) | G::LinearRing(_) | G::MultiLineString(_),
        ) => line::line_area(&second, &first, tolerance),
        (
            G::LineString(_) | G::LinearRing(_) | G::MultiLineString(_),
            G::LineString(_) | G::LinearRing(_) | G::MultiLineString(_),
        ) => line::line_line(&first, &second, tolerance),
    };
    Ok(result)
}

/// Assemble the canonical result: the non-empty parts, a single part
/// directly, no parts as the empty collection.
pub(crate) fn assemble(
    points: MultiPoint,
    lines: MultiLineString,
    polygons: MultiPolygon,
) -> Geometry {
    let mut parts: Vec<Geometry> = Vec::new();
    if !points.is_empty() {
        parts.push(Geometry::MultiPoint(points));
    }
    if !lines.is_empty() {
        parts.push(Geometry::MultiLineString(lines));
    }
    if !polygons.is_empty() {
        parts.push(Geometry::MultiPolygon(polygons));
    }
    match parts.len() {
        0 => Geometry::empty(),
        1 => parts.into_iter().next().expect("exactly one part"),
        _ => Geometry::GeometryCollection(GeometryCollection::new(parts)),
    }
}

pub(crate) fn point_coordinates(geometry: &Geometry) -> Vec<Coordinate> {
    match geometry {
        Geometry::Point(p) => vec![p.coordinate],
        Geometry::MultiPoint(mp) => mp.points.iter().map(|p| p.coordinate).collect(),
        _ => Vec::new(),
    }
}
