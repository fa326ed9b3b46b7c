use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coordinate::Coordinate;
use crate::dimension::Dimension;
use crate::geometry::Geometry;

/// A single position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub coordinate: Coordinate,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            coordinate: Coordinate::new(x, y),
        }
    }

    pub const fn from_coordinate(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::Zero
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.coordinate, self.coordinate)
    }

    /// A point has no boundary.
    pub fn boundary(&self) -> Geometry {
        Geometry::empty()
    }
}

/// An unordered set of points, stored in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    pub points: Vec<Point>,
}

impl MultiPoint {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_coordinates(coordinates: Vec<Coordinate>) -> Self {
        Self {
            points: coordinates.into_iter().map(Point::from_coordinate).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::Zero
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        let mut bounds = Bounds::empty();
        for p in &self.points {
            bounds.expand_to_include(&p.coordinate);
        }
        Some(bounds)
    }

    pub fn boundary(&self) -> Geometry {
        Geometry::empty()
    }

    /// Remove points that duplicate an earlier point within `tolerance`.
    pub fn simplify(&self, tolerance: f64) -> Self {
        let mut kept: Vec<Point> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let duplicate = kept
                .iter()
                .any(|q| q.coordinate.distance_to(&p.coordinate) <= tolerance);
            if !duplicate {
                kept.push(*p);
            }
        }
        Self { points: kept }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_boundary_is_empty() {
        let p = Point::new(1.0, 2.0);
        assert!(p.boundary().is_empty());
        assert_eq!(p.dimension(), Dimension::Zero);
    }

    #[test]
    fn test_multipoint_dimension() {
        assert_eq!(MultiPoint::default().dimension(), Dimension::Empty);
        let mp = MultiPoint::new(vec![Point::new(0.0, 0.0)]);
        assert_eq!(mp.dimension(), Dimension::Zero);
    }

    #[test]
    fn test_multipoint_simplify_removes_duplicates() {
        let mp = MultiPoint::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0 + 1e-9, 1.0),
        ]);
        let simplified = mp.simplify(1e-6);
        assert_eq!(simplified.len(), 2);
    }
}
