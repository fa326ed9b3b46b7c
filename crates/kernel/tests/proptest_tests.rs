//! Property-based tests for kernel invariants using the `proptest` crate.

use proptest::prelude::*;

use planar_kernel::locate::ring_location;
use planar_kernel::segment::{intersect, BoundaryFlags, Segment};
use planar_kernel::{intersection, IntersectionMatrix, Location, Tolerance};
use planar_types::{Coordinate, Dimension, Geometry, LinearRing, Polygon};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary coordinate tuple in a reasonable floating-point range.
fn arb_coordinate() -> impl Strategy<Value = (f64, f64)> {
    (-100.0f64..100.0, -100.0f64..100.0)
}

/// Arbitrary axis-aligned rectangle: origin plus clearly positive extents.
fn arb_rect() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-20.0f64..20.0, -20.0f64..20.0, 0.5f64..10.0, 0.5f64..10.0)
}

/// Arbitrary DE-9IM cell values.
fn arb_cells() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..4, 9)
}

fn rect_geometry(x: f64, y: f64, w: f64, h: f64) -> Geometry {
    Geometry::Polygon(Polygon::from_outer(rect_ring(x, y, w, h)))
}

fn rect_ring(x: f64, y: f64, w: f64, h: f64) -> LinearRing {
    LinearRing::new(vec![
        Coordinate::new(x, y),
        Coordinate::new(x + w, y),
        Coordinate::new(x + w, y + h),
        Coordinate::new(x, y + h),
    ])
}

fn location_of_index(k: usize) -> Location {
    [Location::Interior, Location::Boundary, Location::Exterior][k]
}

fn matrix_from(cells: &[u8]) -> IntersectionMatrix {
    let mut m = IntersectionMatrix::new();
    for (i, v) in cells.iter().enumerate() {
        let dimension = match v {
            0 => Dimension::Empty,
            1 => Dimension::Zero,
            2 => Dimension::One,
            _ => Dimension::Two,
        };
        m = m.with(location_of_index(i / 3), location_of_index(i % 3), dimension);
    }
    m
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// 1. Segment classification is symmetric in its operands
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn segment_intersection_symmetry(
        (ax, ay) in arb_coordinate(),
        (bx, by) in arb_coordinate(),
        (cx, cy) in arb_coordinate(),
        (dx, dy) in arb_coordinate(),
    ) {
        let tol = Tolerance::default();
        let first = Segment::new(Coordinate::new(ax, ay), Coordinate::new(bx, by));
        let second = Segment::new(Coordinate::new(cx, cy), Coordinate::new(dx, dy));
        let forward = intersect(&first, &second, BoundaryFlags::default(), &tol);
        let backward = intersect(&second, &first, BoundaryFlags::default(), &tol);
        prop_assert_eq!(forward.contact.is_some(), backward.contact.is_some(),
            "contact presence must not depend on operand order");
    }
}

// ---------------------------------------------------------------------------
// 2. Ray-cast location matches the coordinate-comparison oracle
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ring_location_matches_rectangle_oracle(
        (rx, ry, rw, rh) in arb_rect(),
        (px, py) in arb_coordinate(),
    ) {
        let tol = Tolerance::default();
        // Stay clear of the boundary band where tolerance decides.
        let margin = 2.0 * tol.coincidence;
        prop_assume!((px - rx).abs() > margin && (px - (rx + rw)).abs() > margin);
        prop_assume!((py - ry).abs() > margin && (py - (ry + rh)).abs() > margin);

        let ring = rect_ring(rx, ry, rw, rh);
        let expected = if px > rx && px < rx + rw && py > ry && py < ry + rh {
            Location::Interior
        } else {
            Location::Exterior
        };
        prop_assert_eq!(ring_location(&Coordinate::new(px, py), &ring, &tol), expected);
    }
}

// ---------------------------------------------------------------------------
// 3. Intersection is deterministic: repeated calls are bit-identical
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn intersection_deterministic(
        (x0, y0, w0, h0) in arb_rect(),
        (x1, y1, w1, h1) in arb_rect(),
    ) {
        let a = rect_geometry(x0, y0, w0, h0);
        let b = rect_geometry(x1, y1, w1, h1);
        let first = intersection(&a, &b).expect("supported pair");
        let second = intersection(&a, &b).expect("supported pair");
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// 4. Self-intersection identity: P ∩ P is P
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn self_intersection_identity((x, y, w, h) in arb_rect()) {
        let p = rect_geometry(x, y, w, h);
        match intersection(&p, &p.clone()).expect("supported pair") {
            Geometry::MultiPolygon(mp) => {
                prop_assert_eq!(mp.len(), 1);
                let area = mp.polygons[0].outer.signed_area().abs();
                prop_assert!((area - w * h).abs() < TOL,
                    "area={} expected={}", area, w * h);
            }
            other => prop_assert!(false, "expected MultiPolygon, got {:?}", other),
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Rectangle overlap area oracle
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rectangle_intersection_area_oracle(
        (x0, y0, w0, h0) in arb_rect(),
        (x1, y1, w1, h1) in arb_rect(),
    ) {
        let overlap_w = (x0 + w0).min(x1 + w1) - x0.max(x1);
        let overlap_h = (y0 + h0).min(y1 + h1) - y0.max(y1);
        // Skip the degenerate band where touching and tolerance interact.
        prop_assume!(overlap_w.abs() > 0.1 && overlap_h.abs() > 0.1);

        let a = rect_geometry(x0, y0, w0, h0);
        let b = rect_geometry(x1, y1, w1, h1);
        let result = intersection(&a, &b).expect("supported pair");

        if overlap_w > 0.0 && overlap_h > 0.0 {
            match result {
                Geometry::MultiPolygon(mp) => {
                    prop_assert_eq!(mp.len(), 1);
                    let area = mp.polygons[0].outer.signed_area().abs();
                    let expected = overlap_w * overlap_h;
                    prop_assert!((area - expected).abs() < TOL,
                        "area={} expected={}", area, expected);
                }
                other => prop_assert!(false, "expected MultiPolygon, got {:?}", other),
            }
        } else {
            prop_assert!(result.is_empty(), "expected empty, got {:?}", result);
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Matrix merge is monotonic, commutative, idempotent
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn matrix_merge_monotonic(cells_a in arb_cells(), cells_b in arb_cells()) {
        let a = matrix_from(&cells_a);
        let b = matrix_from(&cells_b);
        let merged = a.merge(&b);
        for row in 0..3 {
            for col in 0..3 {
                let first = location_of_index(row);
                let second = location_of_index(col);
                prop_assert!(merged.get(first, second) >= a.get(first, second));
                prop_assert!(merged.get(first, second) >= b.get(first, second));
            }
        }
        prop_assert_eq!(merged, b.merge(&a));
        prop_assert_eq!(merged.merge(&merged.clone()), merged);
    }
}
