//! Segment-segment intersection classification.
//!
//! This is the lowest layer of the kernel: everything above (locating,
//! relating, clipping) is built on classifying how two directed segments
//! touch.

use nalgebra::Matrix2;
use planar_types::{Bounds, Coordinate};

use crate::Tolerance;

/// Where a coordinate falls relative to a segment or ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// An ordered pair of coordinates. Direction carries no geometric meaning,
/// but the order determines which endpoint produced which classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub left: Coordinate,
    pub right: Coordinate,
}

impl Segment {
    pub fn new(left: Coordinate, right: Coordinate) -> Self {
        Self { left, right }
    }

    pub fn length(&self) -> f64 {
        self.left.distance_to(&self.right)
    }

    pub fn midpoint(&self) -> Coordinate {
        self.left.midpoint(&self.right)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_coordinates(&[self.left, self.right])
    }

    /// Coefficients `(a, b, c)` of the line equation `a·x + b·y = c`.
    pub fn line_coefficients(&self) -> (f64, f64, f64) {
        let a = self.right.y - self.left.y;
        let b = self.left.x - self.right.x;
        let c = a * self.left.x + b * self.left.y;
        (a, b, c)
    }

    /// Cross product of the segment direction with `left -> c`; positive
    /// when `c` lies to the left of the directed segment.
    pub fn is_left(&self, c: &Coordinate) -> f64 {
        (self.right.x - self.left.x) * (c.y - self.left.y)
            - (self.right.y - self.left.y) * (c.x - self.left.x)
    }

    /// Classify a coordinate against this segment: exact endpoint match is
    /// `Boundary`, on the open segment within the coincidence tolerance is
    /// `Interior`, everything else `Exterior`.
    pub fn location_of(&self, c: &Coordinate, tolerance: &Tolerance) -> Location {
        if !self.bounds().expanded(tolerance.coincidence).contains(c) {
            return Location::Exterior;
        }
        if *c == self.left || *c == self.right {
            return Location::Boundary;
        }
        let (a, b, rhs) = self.line_coefficients();
        let residual = a * c.x + b * c.y - rhs;
        if residual.abs() <= tolerance.coincidence {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

/// The geometric extent two segments share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Point(Coordinate),
    Overlap(Segment),
}

/// Which endpoints of the two segments are boundary points of their parent
/// curves.
///
/// A standalone segment is its own curve, so the default marks every
/// endpoint as a curve boundary. Ring edges and mid-curve segments clear
/// the flags for their shared vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryFlags {
    pub first_left: bool,
    pub first_right: bool,
    pub second_left: bool,
    pub second_right: bool,
}

impl Default for BoundaryFlags {
    fn default() -> Self {
        Self {
            first_left: true,
            first_right: true,
            second_left: true,
            second_right: true,
        }
    }
}

impl BoundaryFlags {
    /// No endpoint is a curve boundary (segments taken from closed rings).
    pub fn none() -> Self {
        Self {
            first_left: false,
            first_right: false,
            second_left: false,
            second_right: false,
        }
    }
}

/// Full classification of how two segments touch.
///
/// The four locations classify each segment's endpoints against the other
/// segment. `interiors_touch_at_point` is true only when the touching
/// coordinate is not a declared boundary endpoint of either parent curve,
/// so a curve's own endpoint is never double-counted as an interior
/// crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    pub first_left: Location,
    pub first_right: Location,
    pub second_left: Location,
    pub second_right: Location,
    pub interiors_touch_at_point: bool,
    pub contact: Option<Contact>,
}

impl SegmentIntersection {
    /// The zero-valued result: everything exterior, no shared geometry.
    pub fn none() -> Self {
        Self {
            first_left: Location::Exterior,
            first_right: Location::Exterior,
            second_left: Location::Exterior,
            second_right: Location::Exterior,
            interiors_touch_at_point: false,
            contact: None,
        }
    }
}

/// Classify the intersection of two segments.
///
/// Resolution order for touching endpoints: full containment of one
/// segment in the other, shared endpoint, collinear partial overlap,
/// boundary-of-one/interior-of-other touch. With no endpoint touching,
/// a proper interior crossing is solved by Cramer's rule, guarded by
/// sign-change tests on both segments. Parallel and degenerate inputs
/// yield the zero-valued result, never an error.
pub fn intersect(
    first: &Segment,
    second: &Segment,
    flags: BoundaryFlags,
    tolerance: &Tolerance,
) -> SegmentIntersection {
    if !first
        .bounds()
        .expanded(tolerance.coincidence)
        .intersects(&second.bounds())
    {
        return SegmentIntersection::none();
    }

    let first_left = second.location_of(&first.left, tolerance);
    let first_right = second.location_of(&first.right, tolerance);
    let second_left = first.location_of(&second.left, tolerance);
    let second_right = first.location_of(&second.right, tolerance);

    let result = SegmentIntersection {
        first_left,
        first_right,
        second_left,
        second_right,
        interiors_touch_at_point: false,
        contact: None,
    };

    let touches = |location: Location| location != Location::Exterior;

    if [first_left, first_right, second_left, second_right]
        .iter()
        .any(|l| touches(*l))
    {
        // Full containment of one segment in the other.
        if touches(first_left) && touches(first_right) {
            return SegmentIntersection {
                contact: Some(Contact::Overlap(*first)),
                ..result
            };
        }
        if touches(second_left) && touches(second_right) {
            return SegmentIntersection {
                contact: Some(Contact::Overlap(*second)),
                ..result
            };
        }

        // Shared single endpoint.
        if let Some((shared, first_is_left, second_is_left)) = shared_endpoint(first, second) {
            let first_flag = if first_is_left {
                flags.first_left
            } else {
                flags.first_right
            };
            let second_flag = if second_is_left {
                flags.second_left
            } else {
                flags.second_right
            };
            return SegmentIntersection {
                interiors_touch_at_point: !first_flag && !second_flag,
                contact: Some(Contact::Point(shared)),
                ..result
            };
        }

        // Remaining touches are endpoints lying on the other segment's
        // interior: two distinct such points mean a collinear partial
        // overlap, one means a T-junction.
        let mut touch_points: Vec<(Coordinate, bool)> = Vec::new();
        if touches(first_left) {
            touch_points.push((first.left, flags.first_left));
        }
        if touches(first_right) {
            touch_points.push((first.right, flags.first_right));
        }
        if touches(second_left) {
            touch_points.push((second.left, flags.second_left));
        }
        if touches(second_right) {
            touch_points.push((second.right, flags.second_right));
        }
        touch_points.dedup_by(|a, b| a.0 == b.0);

        if touch_points.len() >= 2 && touch_points[0].0 != touch_points[1].0 {
            let (p, q) = (touch_points[0].0, touch_points[1].0);
            if p.distance_to(&q) <= tolerance.coincidence {
                return SegmentIntersection {
                    contact: Some(Contact::Point(p)),
                    ..result
                };
            }
            return SegmentIntersection {
                contact: Some(Contact::Overlap(Segment::new(p, q))),
                ..result
            };
        }

        if let Some(&(point, is_curve_boundary)) = touch_points.first() {
            return SegmentIntersection {
                interiors_touch_at_point: !is_curve_boundary,
                contact: Some(Contact::Point(point)),
                ..result
            };
        }
    }

    // Proper interior crossing: both segments must show a genuine sign
    // change against the other's line.
    let (a1, b1, c1) = first.line_coefficients();
    let (a2, b2, c2) = second.line_coefficients();
    let denominator = Matrix2::new(a1, b1, a2, b2).determinant();
    if denominator.abs() < 1e-12 {
        return SegmentIntersection::none(); // parallel or degenerate
    }

    let first_crosses = second.is_left(&first.left) * second.is_left(&first.right) < 0.0;
    let second_crosses = first.is_left(&second.left) * first.is_left(&second.right) < 0.0;
    if !(first_crosses && second_crosses) {
        return SegmentIntersection::none();
    }

    let x = Matrix2::new(c1, b1, c2, b2).determinant() / denominator;
    let y = Matrix2::new(a1, c1, a2, c2).determinant() / denominator;
    SegmentIntersection {
        first_left: Location::Exterior,
        first_right: Location::Exterior,
        second_left: Location::Exterior,
        second_right: Location::Exterior,
        interiors_touch_at_point: true,
        contact: Some(Contact::Point(Coordinate::new(x, y))),
    }
}

fn shared_endpoint(first: &Segment, second: &Segment) -> Option<(Coordinate, bool, bool)> {
    for (fc, first_is_left) in [(first.left, true), (first.right, false)] {
        for (sc, second_is_left) in [(second.left, true), (second.right, false)] {
            if fc == sc {
                return Some((fc, first_is_left, second_is_left));
            }
        }
    }
    None
}
