//! Two-dimensional intersections: polygon × polygon and the multipolygon
//! combinations, delegated pairwise to the clipping engine.

use planar_types::{Coordinate, Geometry, MultiPoint, MultiPolygon, Polygon};

use super::{assemble, line::coalesce};
use crate::clip::polygon_intersection;
use crate::segment::Segment;
use crate::Tolerance;

fn polygons_of(geometry: &Geometry) -> Vec<&Polygon> {
    match geometry {
        Geometry::Polygon(p) => vec![p],
        Geometry::MultiPolygon(mp) => mp.polygons.iter().collect(),
        _ => Vec::new(),
    }
}

/// Intersect every polygon of one operand with every polygon of the
/// other, concatenating the 2-D pieces and the touch artifacts.
pub(crate) fn area_area(first: &Geometry, second: &Geometry, tolerance: &Tolerance) -> Geometry {
    let mut points: Vec<Coordinate> = Vec::new();
    let mut lines: Vec<Segment> = Vec::new();
    let mut polygons: Vec<Polygon> = Vec::new();

    for a in polygons_of(first) {
        for b in polygons_of(second) {
            let clip = polygon_intersection(a, b, tolerance);
            points.extend(clip.points);
            lines.extend(clip.lines);
            polygons.extend(clip.polygons);
        }
    }

    // A touch artifact from one pair may lie on a solid piece from
    // another pair; prune across the whole result.
    let ring_refs: Vec<_> = polygons
        .iter()
        .flat_map(|p| std::iter::once(&p.outer).chain(p.holes.iter()))
        .collect();
    let (points, lines) = crate::clip::prune_artifacts(points, lines, &ring_refs, tolerance);

    assemble(
        MultiPoint::from_coordinates(points),
        coalesce(lines),
        MultiPolygon::new(polygons),
    )
}
