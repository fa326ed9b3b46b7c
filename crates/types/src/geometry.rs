use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::collection::GeometryCollection;
use crate::dimension::Dimension;
use crate::line_string::{LineString, LinearRing, MultiLineString};
use crate::point::{MultiPoint, Point};
use crate::polygon::{MultiPolygon, Polygon};

/// Closed sum type over every supported geometry.
///
/// All dispatch in this crate and in the kernel is by exhaustive matching,
/// so adding a variant is a compile error everywhere one is unhandled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    LinearRing(LinearRing),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The canonical empty geometry: a collection with no members.
    pub fn empty() -> Self {
        Geometry::GeometryCollection(GeometryCollection::default())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(p) => p.dimension(),
            Geometry::MultiPoint(mp) => mp.dimension(),
            Geometry::LineString(ls) => ls.dimension(),
            Geometry::LinearRing(ring) => ring.dimension(),
            Geometry::MultiLineString(mls) => mls.dimension(),
            Geometry::Polygon(p) => p.dimension(),
            Geometry::MultiPolygon(mp) => mp.dimension(),
            Geometry::GeometryCollection(gc) => gc.dimension(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::MultiPoint(mp) => mp.is_empty(),
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::LinearRing(ring) => ring.is_empty(),
            Geometry::MultiLineString(mls) => mls.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPolygon(mp) => mp.is_empty(),
            Geometry::GeometryCollection(gc) => {
                gc.geometries.iter().all(Geometry::is_empty)
            }
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Geometry::Point(p) => Some(p.bounds()),
            Geometry::MultiPoint(mp) => mp.bounds(),
            Geometry::LineString(ls) => ls.bounds(),
            Geometry::LinearRing(ring) => ring.bounds(),
            Geometry::MultiLineString(mls) => mls.bounds(),
            Geometry::Polygon(p) => p.bounds(),
            Geometry::MultiPolygon(mp) => mp.bounds(),
            Geometry::GeometryCollection(gc) => gc.bounds(),
        }
    }

    /// The closure of the combinatorial boundary (OGC semantics).
    pub fn boundary(&self) -> Geometry {
        match self {
            Geometry::Point(p) => p.boundary(),
            Geometry::MultiPoint(mp) => mp.boundary(),
            Geometry::LineString(ls) => ls.boundary(),
            Geometry::LinearRing(ring) => ring.boundary(),
            Geometry::MultiLineString(mls) => mls.boundary(),
            Geometry::Polygon(p) => p.boundary(),
            Geometry::MultiPolygon(mp) => mp.boundary(),
            // The boundary of a heterogeneous collection is not defined.
            Geometry::GeometryCollection(_) => Geometry::empty(),
        }
    }

    /// Remove duplicate and colinear consecutive vertices within `tolerance`.
    pub fn simplify(&self, tolerance: f64) -> Geometry {
        match self {
            Geometry::Point(p) => Geometry::Point(*p),
            Geometry::MultiPoint(mp) => Geometry::MultiPoint(mp.simplify(tolerance)),
            Geometry::LineString(ls) => Geometry::LineString(ls.simplify(tolerance)),
            Geometry::LinearRing(ring) => Geometry::LinearRing(ring.simplify(tolerance)),
            Geometry::MultiLineString(mls) => {
                Geometry::MultiLineString(mls.simplify(tolerance))
            }
            Geometry::Polygon(p) => Geometry::Polygon(p.simplify(tolerance)),
            Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.simplify(tolerance)),
            Geometry::GeometryCollection(gc) => {
                Geometry::GeometryCollection(gc.simplify(tolerance))
            }
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<LinearRing> for Geometry {
    fn from(value: LinearRing) -> Self {
        Geometry::LinearRing(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;

    #[test]
    fn test_empty_geometry() {
        let empty = Geometry::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.dimension(), Dimension::Empty);
        assert!(empty.bounds().is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let g = Geometry::Polygon(Polygon::from_outer(LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(4.0, 0.0),
            Coordinate::new(4.0, 4.0),
            Coordinate::new(0.0, 4.0),
        ])));
        let json = serde_json::to_string(&g).expect("serialize");
        let back: Geometry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(g, back);
    }

    #[test]
    fn test_boundary_of_polygon_dimension() {
        let g = Geometry::Polygon(Polygon::from_outer(LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(4.0, 0.0),
            Coordinate::new(4.0, 4.0),
        ])));
        assert_eq!(g.boundary().dimension(), Dimension::One);
    }
}
