use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::dimension::Dimension;
use crate::geometry::Geometry;

/// A heterogeneous ordered sequence of geometries.
///
/// The empty collection is the canonical "no intersection" answer across
/// the kernel; it is a valid result, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self { geometries }
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn push(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        self.geometries.iter()
    }

    /// Highest dimension among the members.
    pub fn dimension(&self) -> Dimension {
        self.geometries
            .iter()
            .map(Geometry::dimension)
            .max()
            .unwrap_or(Dimension::Empty)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for g in &self.geometries {
            if let Some(b) = g.bounds() {
                bounds = bounds.union(&b);
            }
        }
        if bounds.is_valid() {
            Some(bounds)
        } else {
            None
        }
    }

    pub fn simplify(&self, tolerance: f64) -> Self {
        Self {
            geometries: self.geometries.iter().map(|g| g.simplify(tolerance)).collect(),
        }
    }
}
