//! Ray-cast point location against rings and polygons.

use planar_types::{Coordinate, LinearRing, MultiPolygon, Polygon};

use crate::segment::{Location, Segment};
use crate::Tolerance;

/// Classify a coordinate against the region enclosed by a ring.
///
/// Boundary is decided first, edge by edge, with the point-on-segment
/// test. Otherwise a ray is cast toward +x and crossings are counted with
/// the half-open convention: a vertex exactly on the ray counts as lying
/// above it, so vertices are never double- or under-counted.
pub fn ring_location(c: &Coordinate, ring: &LinearRing, tolerance: &Tolerance) -> Location {
    let open = ring.open();
    if open.len() < 3 {
        return Location::Exterior;
    }

    for i in 0..open.len() {
        let edge = Segment::new(open[i], open[(i + 1) % open.len()]);
        if edge.location_of(c, tolerance) != Location::Exterior {
            return Location::Boundary;
        }
    }

    let mut inside = false;
    let mut j = open.len() - 1;
    for i in 0..open.len() {
        let a = open[i];
        let b = open[j];
        // `>=` puts a ray-colinear vertex above the ray (half-open rule).
        if (a.y >= c.y) != (b.y >= c.y) {
            let x_cross = (b.x - a.x) * (c.y - a.y) / (b.y - a.y) + a.x;
            if c.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    if inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Classify a coordinate against a polygon with holes: the outer ring
/// decides exterior and boundary; inside a hole flips to exterior, on a
/// hole boundary flips to boundary.
pub fn polygon_location(c: &Coordinate, polygon: &Polygon, tolerance: &Tolerance) -> Location {
    match ring_location(c, &polygon.outer, tolerance) {
        Location::Exterior => Location::Exterior,
        Location::Boundary => Location::Boundary,
        Location::Interior => {
            for hole in &polygon.holes {
                match ring_location(c, hole, tolerance) {
                    Location::Interior => return Location::Exterior,
                    Location::Boundary => return Location::Boundary,
                    Location::Exterior => {}
                }
            }
            Location::Interior
        }
    }
}

/// Classify a coordinate against a multipolygon: interior of any member
/// wins, then boundary of any member; exterior only when every member
/// reports exterior.
pub fn multipolygon_location(
    c: &Coordinate,
    multipolygon: &MultiPolygon,
    tolerance: &Tolerance,
) -> Location {
    let mut on_boundary = false;
    for polygon in &multipolygon.polygons {
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

#[cfg(test)]
mod tests {
    use super::*;
    use planar_types::LinearRing;

    fn square_4x4() -> LinearRing {
        LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(4.0, 0.0),
            Coordinate::new(4.0, 4.0),
            Coordinate::new(0.0, 4.0),
        ])
    }

    #[test]
    fn test_point_in_square() {
        let ring = square_4x4();
        let tol = Tolerance::default();
        assert_eq!(
            ring_location(&Coordinate::new(2.0, 2.0), &ring, &tol),
            Location::Interior
        );
        assert_eq!(
            ring_location(&Coordinate::new(5.0, 5.0), &ring, &tol),
            Location::Exterior
        );
        assert_eq!(
            ring_location(&Coordinate::new(4.0, 2.0), &ring, &tol),
            Location::Boundary
        );
    }

    #[test]
    fn test_vertex_is_boundary() {
        let ring = square_4x4();
        let tol = Tolerance::default();
        assert_eq!(
            ring_location(&Coordinate::new(0.0, 0.0), &ring, &tol),
            Location::Boundary
        );
    }

    #[test]
    fn test_ray_through_vertex() {
        // A concave ring whose vertex lies exactly on the test ray; the
        // half-open rule must still count crossings correctly.
        let ring = LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(4.0, 0.0),
            Coordinate::new(4.0, 2.0),
            Coordinate::new(6.0, 2.0),
            Coordinate::new(6.0, 4.0),
            Coordinate::new(0.0, 4.0),
        ]);
        let tol = Tolerance::default();
        assert_eq!(
            ring_location(&Coordinate::new(1.0, 2.0), &ring, &tol),
            Location::Interior
        );
        assert_eq!(
            ring_location(&Coordinate::new(7.0, 2.0), &ring, &tol),
            Location::Exterior
        );
    }

    #[test]
    fn test_degenerate_ring_is_exterior() {
        let ring = LinearRing::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]);
        let tol = Tolerance::default();
        assert_eq!(
            ring_location(&Coordinate::new(0.5, 0.0), &ring, &tol),
            Location::Exterior
        );
    }

    #[test]
    fn test_polygon_with_hole() {
        let hole = LinearRing::new(vec![
            Coordinate::new(1.0, 1.0),
            Coordinate::new(3.0, 1.0),
            Coordinate::new(3.0, 3.0),
            Coordinate::new(1.0, 3.0),
        ]);
        let polygon = Polygon::new(square_4x4(), vec![hole]);
        let tol = Tolerance::default();
        assert_eq!(
            polygon_location(&Coordinate::new(2.0, 2.0), &polygon, &tol),
            Location::Exterior,
            "inside the hole is outside the polygon"
        );
        assert_eq!(
            polygon_location(&Coordinate::new(1.0, 2.0), &polygon, &tol),
            Location::Boundary,
            "on the hole ring is on the polygon boundary"
        );
        assert_eq!(
            polygon_location(&Coordinate::new(0.5, 0.5), &polygon, &tol),
            Location::Interior
        );
    }

    #[test]
    fn test_multipolygon_location() {
        let a = Polygon::from_outer(square_4x4());
        let b = Polygon::from_outer(LinearRing::new(vec![
            Coordinate::new(10.0, 0.0),
            Coordinate::new(14.0, 0.0),
            Coordinate::new(14.0, 4.0),
            Coordinate::new(10.0, 4.0),
        ]));
        let mp = MultiPolygon::new(vec![a, b]);
        let tol = Tolerance::default();
        assert_eq!(
            multipolygon_location(&Coordinate::new(12.0, 2.0), &mp, &tol),
            Location::Interior
        );
        assert_eq!(
            multipolygon_location(&Coordinate::new(7.0, 2.0), &mp, &tol),
            Location::Exterior
        );
        assert_eq!(
            multipolygon_location(&Coordinate::new(4.0, 2.0), &mp, &tol),
            Location::Boundary
        );
    }
}
