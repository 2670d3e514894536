#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance_is_euclidean() {
    let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn point_distance_is_symmetric() {
    let a = Point::new(-2.0, 7.5);
    let b = Point::new(10.0, -1.0);
    assert!(approx_eq(a.distance(b), b.distance(a)));
}

#[test]
fn point_midpoint() {
    let m = Point::new(10.0, 20.0).midpoint(Point::new(30.0, 60.0));
    assert_eq!(m, Point::new(20.0, 40.0));
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(Point::new(1.5, 2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": 2.0 }));
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn rect_contains_interior() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(r.contains(Point::new(50.0, 50.0)));
}

#[test]
fn rect_contains_edges_inclusive() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(100.0, 100.0)));
    assert!(r.contains(Point::new(100.0, 0.0)));
}

#[test]
fn rect_excludes_outside() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(!r.contains(Point::new(100.5, 50.0)));
    assert!(!r.contains(Point::new(50.0, -0.5)));
}

#[test]
fn rect_rounded_snaps_all_components() {
    let r = Rect::new(1.4, 2.6, 99.5, 10.2).rounded();
    assert_eq!(r, Rect::new(1.0, 3.0, 100.0, 10.0));
}
