//! Topological relations (DE-9IM) and set-theoretic intersection for 2-D
//! vector geometries.
//!
//! The kernel is purely synchronous and side-effect-free on its inputs:
//! every operation is a deterministic function of its arguments. Geometries
//! come from `planar-types`; all tolerance-based decisions are made here,
//! against the [`Tolerance`] configuration.

pub mod clip;
pub mod graph;
pub mod locate;
pub mod overlay;
pub mod relate;
pub mod segment;

pub use overlay::{intersection, OverlayError};
pub use relate::IntersectionMatrix;
pub use segment::{Contact, Location, Segment, SegmentIntersection};

use planar_types::Coordinate;

/// Global tolerance configuration for geometric comparisons.
///
/// Two constants, two distinct quantities: `coincidence` is a length used
/// when classifying a coordinate against a segment or ring boundary;
/// `angular` is the epsilon for turn-angle and edge-length tie-breaks in
/// the planar-graph trace. Neither literal appears anywhere else.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Coordinates within this distance of a segment's line are classified
    /// as lying on it.
    pub coincidence: f64,
    /// Angles (radians) and lengths closer than this are considered tied.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 0.01,
            angular: 1e-6,
        }
    }
}

impl Tolerance {
    pub fn coordinates_coincident(&self, a: &Coordinate, b: &Coordinate) -> bool {
        a.distance_to(b) <= self.coincidence
    }
}

/// The default tolerance used by every top-level entry point.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
