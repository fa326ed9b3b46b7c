use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Axis-aligned bounding box over 2-D coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl Bounds {
    pub fn new(min: Coordinate, max: Coordinate) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Coordinate::new(f64::INFINITY, f64::INFINITY),
            max: Coordinate::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_coordinates(coordinates: &[Coordinate]) -> Self {
        let mut bounds = Self::empty();
        for c in coordinates {
            bounds.expand_to_include(c);
        }
        bounds
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn expand_to_include(&mut self, c: &Coordinate) {
        self.min.x = self.min.x.min(c.x);
        self.min.y = self.min.y.min(c.y);
        self.max.x = self.max.x.max(c.x);
        self.max.y = self.max.y.max(c.y);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Coordinate::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Coordinate::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, c: &Coordinate) -> bool {
        c.x >= self.min.x && c.x <= self.max.x && c.y >= self.min.y && c.y <= self.max.y
    }

    /// A copy grown by `margin` on every side. Used for tolerant rejection
    /// tests so touching boxes still register as overlapping.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Coordinate::new(self.min.x - margin, self.min.y - margin),
            max: Coordinate::new(self.max.x + margin, self.max.y + margin),
        }
    }
}
