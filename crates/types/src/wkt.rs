//! Well-known-text reading and writing.
//!
//! The reader is a hand-rolled recursive-descent parser; the writer emits
//! the canonical uppercase form. `LINEARRING` is accepted and produced as
//! an extension tag, since rings are first-class in this model.

use thiserror::Error;

use crate::collection::GeometryCollection;
use crate::coordinate::Coordinate;
use crate::geometry::Geometry;
use crate::line_string::{LineString, LinearRing, MultiLineString};
use crate::point::{MultiPoint, Point};
use crate::polygon::{MultiPolygon, Polygon};

/// Errors while parsing well-known text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WktError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected input at offset {offset}: expected {expected}")]
    Unexpected {
        offset: usize,
        expected: &'static str,
    },

    #[error("unknown geometry type: {0}")]
    UnknownGeometryType(String),

    #[error("invalid number at offset {offset}: {text}")]
    InvalidNumber { offset: usize, text: String },

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
}

// ─── Writer ─────────────────────────────────────────────────────────────────

/// Render a geometry as well-known text.
pub fn write(geometry: &Geometry) -> String {
    let mut out = String::new();
    write_geometry(geometry, &mut out);
    out
}

fn write_geometry(geometry: &Geometry, out: &mut String) {
    match geometry {
        Geometry::Point(p) => {
            out.push_str("POINT (");
            write_coordinate(&p.coordinate, out);
            out.push(')');
        }
        Geometry::MultiPoint(mp) => {
            if mp.is_empty() {
                out.push_str("MULTIPOINT EMPTY");
            } else {
                out.push_str("MULTIPOINT (");
                for (i, p) in mp.points.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push('(');
                    write_coordinate(&p.coordinate, out);
                    out.push(')');
                }
                out.push(')');
            }
        }
        Geometry::LineString(ls) => {
            write_tagged_sequence("LINESTRING", &ls.coordinates, out);
        }
        Geometry::LinearRing(ring) => {
            write_tagged_sequence("LINEARRING", &ring.coordinates, out);
        }
        Geometry::MultiLineString(mls) => {
            if mls.is_empty() {
                out.push_str("MULTILINESTRING EMPTY");
            } else {
                out.push_str("MULTILINESTRING (");
                for (i, ls) in mls.line_strings.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_sequence(&ls.coordinates, out);
                }
                out.push(')');
            }
        }
        Geometry::Polygon(p) => {
            if p.is_empty() {
                out.push_str("POLYGON EMPTY");
            } else {
                out.push_str("POLYGON ");
                write_polygon_body(p, out);
            }
        }
        Geometry::MultiPolygon(mp) => {
            if mp.is_empty() {
                out.push_str("MULTIPOLYGON EMPTY");
            } else {
                out.push_str("MULTIPOLYGON (");
                for (i, p) in mp.polygons.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_polygon_body(p, out);
                }
                out.push(')');
            }
        }
        Geometry::GeometryCollection(gc) => {
            if gc.is_empty() {
                out.push_str("GEOMETRYCOLLECTION EMPTY");
            } else {
                out.push_str("GEOMETRYCOLLECTION (");
                for (i, g) in gc.geometries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_geometry(g, out);
                }
                out.push(')');
            }
        }
    }
}

fn write_tagged_sequence(tag: &str, coordinates: &[Coordinate], out: &mut String) {
    out.push_str(tag);
    if coordinates.is_empty() {
        out.push_str(" EMPTY");
    } else {
        out.push(' ');
        write_sequence(coordinates, out);
    }
}

fn write_polygon_body(polygon: &Polygon, out: &mut String) {
    out.push('(');
    write_sequence(&polygon.outer.coordinates, out);
    for hole in &polygon.holes {
        out.push_str(", ");
        write_sequence(&hole.coordinates, out);
    }
    out.push(')');
}

fn write_sequence(coordinates: &[Coordinate], out: &mut String) {
    out.push('(');
    for (i, c) in coordinates.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coordinate(c, out);
    }
    out.push(')');
}

fn write_coordinate(c: &Coordinate, out: &mut String) {
    out.push_str(&format!("{} {}", c.x, c.y));
}

// ─── Reader ─────────────────────────────────────────────────────────────────

/// Parse well-known text into a geometry.
pub fn parse(input: &str) -> Result<Geometry, WktError> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
    };
    let geometry = parser.parse_geometry()?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(WktError::TrailingInput(parser.pos));
    }
    Ok(geometry)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.input.get(self.pos).copied()
    }

    fn expect(&mut self, ch: u8, expected: &'static str) -> Result<(), WktError> {
        match self.peek() {
            Some(found) if found == ch => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(WktError::Unexpected {
                offset: self.pos,
                expected,
            }),
            None => Err(WktError::UnexpectedEnd),
        }
    }

    fn try_consume(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_keyword(&mut self) -> Result<String, WktError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        if self.pos == start {
            return if self.pos >= self.input.len() {
                Err(WktError::UnexpectedEnd)
            } else {
                Err(WktError::Unexpected {
                    offset: self.pos,
                    expected: "a geometry tag",
                })
            };
        }
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .expect("ASCII alphabetic bytes")
            .to_ascii_uppercase();
        Ok(text)
    }

    /// Consume the keyword `EMPTY` if it is next; leave the input untouched
    /// otherwise.
    fn try_empty(&mut self) -> bool {
        let saved = self.pos;
        match self.parse_keyword() {
            Ok(kw) if kw == "EMPTY" => true,
            _ => {
                self.pos = saved;
                false
            }
        }
    }

    fn parse_number(&mut self) -> Result<f64, WktError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.input.len()
            && matches!(self.input[self.pos], b'0'..=b'9' | b'.' | b'+' | b'-' | b'e' | b'E')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return if self.pos >= self.input.len() {
                Err(WktError::UnexpectedEnd)
            } else {
                Err(WktError::Unexpected {
                    offset: self.pos,
                    expected: "a number",
                })
            };
        }
        let text = std::str::from_utf8(&self.input[start..self.pos]).expect("ASCII number bytes");
        text.parse::<f64>().map_err(|_| WktError::InvalidNumber {
            offset: start,
            text: text.to_string(),
        })
    }

    fn parse_coordinate(&mut self) -> Result<Coordinate, WktError> {
        let x = self.parse_number()?;
        let y = self.parse_number()?;
        Ok(Coordinate::new(x, y))
    }

    /// `( x y, x y, ... )`
    fn parse_sequence(&mut self) -> Result<Vec<Coordinate>, WktError> {
        self.expect(b'(', "'('")?;
        let mut coordinates = vec![self.parse_coordinate()?];
        while self.try_consume(b',') {
            coordinates.push(self.parse_coordinate()?);
        }
        self.expect(b')', "')'")?;
        Ok(coordinates)
    }

    fn parse_polygon_body(&mut self) -> Result<Polygon, WktError> {
        self.expect(b'(', "'('")?;
        let outer = LinearRing::new(self.parse_sequence()?);
        let mut holes = Vec::new();
        while self.try_consume(b',') {
            holes.push(LinearRing::new(self.parse_sequence()?));
        }
        self.expect(b')', "')'")?;
        Ok(Polygon::new(outer, holes))
    }

    fn parse_geometry(&mut self) -> Result<Geometry, WktError> {
        let tag = self.parse_keyword()?;
        match tag.as_str() {
            "POINT" => {
                if self.try_empty() {
                    return Ok(Geometry::empty());
                }
                self.expect(b'(', "'('")?;
                let c = self.parse_coordinate()?;
                self.expect(b')', "')'")?;
                Ok(Geometry::Point(Point::from_coordinate(c)))
            }
            "MULTIPOINT" => {
                if self.try_empty() {
                    return Ok(Geometry::MultiPoint(MultiPoint::default()));
                }
                self.expect(b'(', "'('")?;
                let mut coordinates = vec![self.parse_multipoint_member()?];
                while self.try_consume(b',') {
                    coordinates.push(self.parse_multipoint_member()?);
                }
                self.expect(b')', "')'")?;
                Ok(Geometry::MultiPoint(MultiPoint::from_coordinates(coordinates)))
            }
            "LINESTRING" => {
                if self.try_empty() {
                    return Ok(Geometry::LineString(LineString::default()));
                }
                Ok(Geometry::LineString(LineString::new(self.parse_sequence()?)))
            }
            "LINEARRING" => {
                if self.try_empty() {
                    return Ok(Geometry::LinearRing(LinearRing::default()));
                }
                Ok(Geometry::LinearRing(LinearRing::new(self.parse_sequence()?)))
            }
            "MULTILINESTRING" => {
                if self.try_empty() {
                    return Ok(Geometry::MultiLineString(MultiLineString::default()));
                }
                self.expect(b'(', "'('")?;
                let mut line_strings = vec![LineString::new(self.parse_sequence()?)];
                while self.try_consume(b',') {
                    line_strings.push(LineString::new(self.parse_sequence()?));
                }
                self.expect(b')', "')'")?;
                Ok(Geometry::MultiLineString(MultiLineString::new(line_strings)))
            }
            "POLYGON" => {
                if self.try_empty() {
                    return Ok(Geometry::Polygon(Polygon::default()));
                }
                Ok(Geometry::Polygon(self.parse_polygon_body()?))
            }
            "MULTIPOLYGON" => {
                if self.try_empty() {
                    return Ok(Geometry::MultiPolygon(MultiPolygon::default()));
                }
                self.expect(b'(', "'('")?;
                let mut polygons = vec![self.parse_polygon_body()?];
                while self.try_consume(b',') {
                    polygons.push(self.parse_polygon_body()?);
                }
                self.expect(b')', "')'")?;
                Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
            "GEOMETRYCOLLECTION" => {
                if self.try_empty() {
                    return Ok(Geometry::empty());
                }
                self.expect(b'(', "'('")?;
                let mut geometries = vec![self.parse_geometry()?];
                while self.try_consume(b',') {
                    geometries.push(self.parse_geometry()?);
                }
                self.expect(b')', "')'")?;
                Ok(Geometry::GeometryCollection(GeometryCollection::new(geometries)))
            }
            other => Err(WktError::UnknownGeometryType(other.to_string())),
        }
    }

    /// A MultiPoint member may be parenthesized (`(1 2)`) or bare (`1 2`).
    fn parse_multipoint_member(&mut self) -> Result<Coordinate, WktError> {
        if self.try_consume(b'(') {
            let c = self.parse_coordinate()?;
            self.expect(b')', "')'")?;
            Ok(c)
        } else {
            self.parse_coordinate()
        }
    }
}
