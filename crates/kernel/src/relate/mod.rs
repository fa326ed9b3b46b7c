//! DE-9IM intersection matrices, accumulators, and named predicates.

pub mod accumulate;

pub use accumulate::SubjectCoordinate;

use serde::{Deserialize, Serialize};

use planar_types::{Dimension, Geometry};

use crate::overlay::OverlayError;
use crate::segment::Location;
use crate::Tolerance;

/// A 3×3 DE-9IM matrix: the dimension of the intersection of the
/// {interior, boundary, exterior} of one geometry with those of another.
///
/// Matrices are immutable values combined with [`IntersectionMatrix::merge`];
/// cells only ever increase in the `Dimension` order, so accumulation over
/// sub-geometries is associative and order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

fn cell_index(location: Location) -> usize {
    match location {
        Location::Interior => 0,
        Location::Boundary => 1,
        Location::Exterior => 2,
    }
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// The disjoint baseline: every cell empty, except exterior × exterior
    /// which always meets with dimension two.
    pub fn new() -> Self {
        let mut cells = [[Dimension::Empty; 3]; 3];
        cells[2][2] = Dimension::Two;
        Self { cells }
    }

    pub fn get(&self, first: Location, second: Location) -> Dimension {
        self.cells[cell_index(first)][cell_index(second)]
    }

    /// Raise a cell to at least `dimension`. Cells never decrease.
    pub fn with(mut self, first: Location, second: Location, dimension: Dimension) -> Self {
        let cell = &mut self.cells[cell_index(first)][cell_index(second)];
        *cell = (*cell).max(dimension);
        self
    }

    /// Pointwise maximum of two matrices.
    pub fn merge(&self, other: &Self) -> Self {
        let mut cells = self.cells;
        for row in 0..3 {
            for col in 0..3 {
                cells[row][col] = cells[row][col].max(other.cells[row][col]);
            }
        }
        Self { cells }
    }

    /// The same relation seen from the second geometry's side.
    pub fn transposed(&self) -> Self {
        let mut cells = [[Dimension::Empty; 3]; 3];
        for row in 0..3 {
            for col in 0..3 {
                cells[col][row] = self.cells[row][col];
            }
        }
        Self { cells }
    }

    /// Canonical 9-character form, row-major from interior × interior.
    pub fn to_de9im_string(&self) -> String {
        let mut out = String::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                out.push(match self.cells[row][col] {
                    Dimension::Empty => 'F',
                    Dimension::Zero => '0',
                    Dimension::One => '1',
                    Dimension::Two => '2',
                });
            }
        }
        out
    }

    /// Match against a DE-9IM pattern of `T`, `F`, `*`, `0`, `1`, `2`.
    /// Malformed patterns never match.
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.len() != 9 {
            return false;
        }
        for row in 0..3 {
            for col in 0..3 {
                let cell = self.cells[row][col];
                let ok = match pattern[row * 3 + col] {
                    'T' => cell != Dimension::Empty,
                    'F' => cell == Dimension::Empty,
                    '*' => true,
                    '0' => cell == Dimension::Zero,
                    '1' => cell == Dimension::One,
                    '2' => cell == Dimension::Two,
                    _ => return false,
                };
                if !ok {
                    return false;
                }
            }
        }
        true
    }

    // ─── Named predicates ───────────────────────────────────────────────

    pub fn is_disjoint(&self) -> bool {
        self.matches("FF*FF****")
    }

    pub fn intersects(&self) -> bool {
        !self.is_disjoint()
    }

    pub fn equals(&self) -> bool {
        self.matches("T*F**FFF*")
    }

    pub fn contains(&self) -> bool {
        self.matches("T*****FF*")
    }

    pub fn within(&self) -> bool {
        self.matches("T*F**F***")
    }

    pub fn touches(&self) -> bool {
        self.matches("FT*******") || self.matches("F**T*****") || self.matches("F***T****")
    }
}

/// Relate two geometries, producing the full DE-9IM matrix.
///
/// Supported pairs are zero-dimensional subjects (Point, MultiPoint)
/// against any non-collection target, plus the transposed orientations.
/// Other combinations surface [`OverlayError::NotImplemented`] rather
/// than silently returning a baseline matrix.
pub fn related_to(
    first: &Geometry,
    second: &Geometry,
    tolerance: &Tolerance,
) -> Result<IntersectionMatrix, OverlayError> {
    let not_implemented = || OverlayError::NotImplemented {
        operation: "relate",
        first: first.type_name(),
        second: second.type_name(),
    };

    match (first, second) {
        (Geometry::Point(p), _) => {
            accumulate::points_related_to(&[p.coordinate], second, tolerance)
                .ok_or_else(not_implemented)
        }
        (Geometry::MultiPoint(mp), _) => {
            let coordinates: Vec<_> = mp.points.iter().map(|p| p.coordinate).collect();
            accumulate::points_related_to(&coordinates, second, tolerance)
                .ok_or_else(not_implemented)
        }
        (_, Geometry::Point(_)) | (_, Geometry::MultiPoint(_)) => {
            related_to(second, first, tolerance).map(|m| m.transposed())
        }
        _ => Err(not_implemented()),
    }
}
