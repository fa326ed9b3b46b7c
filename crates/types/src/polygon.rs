use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::dimension::Dimension;
use crate::geometry::Geometry;
use crate::line_string::{LineString, LinearRing, MultiLineString};

/// A plane region bounded by one outer ring and zero or more holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub outer: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(outer: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { outer, holes }
    }

    pub fn from_outer(outer: LinearRing) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::Two
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.outer.bounds()
    }

    /// All rings, outer first, as a line collection.
    pub fn boundary(&self) -> Geometry {
        if self.is_empty() {
            return Geometry::empty();
        }
        let mut rings = vec![LineString::new(self.outer.coordinates.clone())];
        for hole in &self.holes {
            rings.push(LineString::new(hole.coordinates.clone()));
        }
        Geometry::MultiLineString(MultiLineString::new(rings))
    }

    /// Simplify every ring; holes that collapse below a triangle are dropped.
    pub fn simplify(&self, tolerance: f64) -> Self {
        let outer = self.outer.simplify(tolerance);
        let holes = self
            .holes
            .iter()
            .map(|h| h.simplify(tolerance))
            .filter(|h| h.open().len() >= 3)
            .collect();
        Self { outer, holes }
    }
}

/// A collection of polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.is_empty())
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::Two
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for p in &self.polygons {
            if let Some(b) = p.bounds() {
                bounds = bounds.union(&b);
            }
        }
        if bounds.is_valid() {
            Some(bounds)
        } else {
            None
        }
    }

    pub fn boundary(&self) -> Geometry {
        let mut rings: Vec<LineString> = Vec::new();
        for polygon in &self.polygons {
            if let Geometry::MultiLineString(mls) = polygon.boundary() {
                rings.extend(mls.line_strings);
            }
        }
        if rings.is_empty() {
            Geometry::empty()
        } else {
            Geometry::MultiLineString(MultiLineString::new(rings))
        }
    }

    pub fn simplify(&self, tolerance: f64) -> Self {
        Self {
            polygons: self.polygons.iter().map(|p| p.simplify(tolerance)).collect(),
        }
    }
}
