use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::coordinate::Coordinate;
use crate::dimension::Dimension;
use crate::geometry::Geometry;
use crate::point::MultiPoint;

/// An ordered sequence of coordinates joined by straight segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<Coordinate>,
}

impl LineString {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.coordinates.len() > 1 && self.coordinates.first() == self.coordinates.last()
    }

    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::One
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        Some(Bounds::from_coordinates(&self.coordinates))
    }

    /// The two end points, or nothing for a closed or empty curve.
    pub fn boundary(&self) -> Geometry {
        if self.is_empty() || self.is_closed() {
            return Geometry::empty();
        }
        let first = *self.coordinates.first().expect("non-empty");
        let last = *self.coordinates.last().expect("non-empty");
        Geometry::MultiPoint(MultiPoint::from_coordinates(vec![first, last]))
    }

    pub fn simplify(&self, tolerance: f64) -> Self {
        Self {
            coordinates: simplify_sequence(&self.coordinates, tolerance),
        }
    }
}

/// A closed, simple curve. The constructor closes an open input; the
/// first and last coordinate always coincide when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    pub coordinates: Vec<Coordinate>,
}

impl LinearRing {
    pub fn new(mut coordinates: Vec<Coordinate>) -> Self {
        if let (Some(&first), Some(&last)) = (coordinates.first(), coordinates.last()) {
            if first != last {
                coordinates.push(first);
            }
        }
        Self { coordinates }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// The coordinates without the closing duplicate.
    pub fn open(&self) -> &[Coordinate] {
        if self.coordinates.len() > 1 {
            &self.coordinates[..self.coordinates.len() - 1]
        } else {
            &self.coordinates
        }
    }

    /// Shoelace area; positive for counterclockwise winding.
    pub fn signed_area(&self) -> f64 {
        let open = self.open();
        if open.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..open.len() {
            let a = open[i];
            let b = open[(i + 1) % open.len()];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    pub fn reversed(&self) -> Self {
        let mut coordinates = self.coordinates.clone();
        coordinates.reverse();
        Self { coordinates }
    }

    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::One
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        Some(Bounds::from_coordinates(&self.coordinates))
    }

    /// A closed curve has no boundary.
    pub fn boundary(&self) -> Geometry {
        Geometry::empty()
    }

    pub fn simplify(&self, tolerance: f64) -> Self {
        LinearRing::new(simplify_sequence(&self.coordinates, tolerance))
    }
}

/// A collection of line strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    pub line_strings: Vec<LineString>,
}

impl MultiLineString {
    pub fn new(line_strings: Vec<LineString>) -> Self {
        Self { line_strings }
    }

    pub fn len(&self) -> usize {
        self.line_strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_strings.iter().all(|ls| ls.is_empty())
    }

    pub fn push(&mut self, line_string: LineString) {
        self.line_strings.push(line_string);
    }

    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::One
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for ls in &self.line_strings {
            if let Some(b) = ls.bounds() {
                bounds = bounds.union(&b);
            }
        }
        if bounds.is_valid() {
            Some(bounds)
        } else {
            None
        }
    }

    /// Mod-2 rule: a coordinate is in the boundary iff it is an end
    /// coordinate of an odd number of non-closed constituent curves.
    pub fn boundary(&self) -> Geometry {
        let mut counts: Vec<(Coordinate, usize)> = Vec::new();
        for ls in &self.line_strings {
            if ls.is_empty() || ls.is_closed() {
                continue;
            }
            let first = *ls.coordinates.first().expect("non-empty");
            let last = *ls.coordinates.last().expect("non-empty");
            for end in [first, last] {
                match counts.iter_mut().find(|(c, _)| *c == end) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((end, 1)),
                }
            }
        }
        let odd: Vec<Coordinate> = counts
            .into_iter()
            .filter(|(_, n)| n % 2 == 1)
            .map(|(c, _)| c)
            .collect();
        if odd.is_empty() {
            Geometry::empty()
        } else {
            Geometry::MultiPoint(MultiPoint::from_coordinates(odd))
        }
    }

    pub fn simplify(&self, tolerance: f64) -> Self {
        Self {
            line_strings: self
                .line_strings
                .iter()
                .map(|ls| ls.simplify(tolerance))
                .collect(),
        }
    }
}

/// Drop consecutive duplicates within `tolerance`, then intermediate
/// vertices that are colinear with their neighbors. End coordinates are
/// always preserved.
pub(crate) fn simplify_sequence(coordinates: &[Coordinate], tolerance: f64) -> Vec<Coordinate> {
    let mut deduped: Vec<Coordinate> = Vec::with_capacity(coordinates.len());
    for c in coordinates {
        match deduped.last() {
            Some(prev) if prev.distance_to(c) <= tolerance => {}
            _ => deduped.push(*c),
        }
    }
    if deduped.len() < 3 {
        return deduped;
    }

    let mut out: Vec<Coordinate> = vec![deduped[0]];
    for i in 1..deduped.len() - 1 {
        let a = *out.last().expect("seeded with the first coordinate");
        let b = deduped[i];
        let c = deduped[i + 1];
        if !colinear_between(&a, &b, &c, tolerance) {
            out.push(b);
        }
    }
    out.push(*deduped.last().expect("len >= 3"));
    out
}

/// True when `b` lies on the segment `a`-`c` within `tolerance`.
fn colinear_between(a: &Coordinate, b: &Coordinate, c: &Coordinate, tolerance: f64) -> bool {
    let length = a.distance_to(c);
    if length <= tolerance {
        // a and c coincide; b only survives if it is a genuine spike.
        return a.distance_to(b) <= tolerance;
    }
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross.abs() / length > tolerance {
        return false;
    }
    let dot = (b.x - a.x) * (c.x - a.x) + (b.y - a.y) * (c.y - a.y);
    dot >= 0.0 && dot <= length * length
}
