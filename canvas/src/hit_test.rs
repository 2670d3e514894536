use super::*;

fn transform() -> Transform {
    Transform { x: 100.0, y: 50.0, width: 200.0, height: 100.0, scale: 0.5 }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Corner
// =============================================================

#[test]
fn corner_cursors_are_diagonal_pairs() {
    assert_eq!(Corner::Tl.cursor(), Cursor::NwseResize);
    assert_eq!(Corner::Br.cursor(), Cursor::NwseResize);
    assert_eq!(Corner::Tr.cursor(), Cursor::NeswResize);
    assert_eq!(Corner::Bl.cursor(), Cursor::NeswResize);
}

#[test]
fn corner_sides() {
    assert!(Corner::Tl.on_left() && Corner::Tl.on_top());
    assert!(!Corner::Tr.on_left() && Corner::Tr.on_top());
    assert!(Corner::Bl.on_left() && !Corner::Bl.on_top());
    assert!(!Corner::Br.on_left() && !Corner::Br.on_top());
}

// =============================================================
// handle_positions
// =============================================================

#[test]
fn handle_positions_are_corners() {
    let hs = handle_positions(&transform());
    assert_eq!(hs[0], (Corner::Tl, pt(100.0, 50.0)));
    assert_eq!(hs[1], (Corner::Tr, pt(300.0, 50.0)));
    assert_eq!(hs[2], (Corner::Bl, pt(100.0, 150.0)));
    assert_eq!(hs[3], (Corner::Br, pt(300.0, 150.0)));
}

#[test]
fn handle_positions_are_rounded() {
    let t = Transform { x: 10.4, y: 10.6, width: 99.7, height: 50.2, scale: 1.0 };
    let hs = handle_positions(&t);
    assert_eq!(hs[0].1, pt(10.0, 11.0));
    assert_eq!(hs[3].1, pt(110.0, 61.0));
}

// =============================================================
// handle_at
// =============================================================

#[test]
fn mouse_hits_handle_within_tolerance() {
    // handle 10 * 2.0 → ±10
    assert_eq!(handle_at(pt(309.0, 159.0), &transform(), 10.0, PointerKind::Mouse), Some(Corner::Br));
}

#[test]
fn mouse_misses_handle_outside_tolerance() {
    assert_eq!(handle_at(pt(311.0, 150.0), &transform(), 10.0, PointerKind::Mouse), None);
}

#[test]
fn touch_hits_handle_mouse_would_miss() {
    // handle 10 * 3.0 → ±15
    assert_eq!(handle_at(pt(314.0, 150.0), &transform(), 10.0, PointerKind::Touch), Some(Corner::Br));
    assert_eq!(handle_at(pt(314.0, 150.0), &transform(), 10.0, PointerKind::Mouse), None);
}

#[test]
fn overlapping_handles_resolve_in_fixed_order() {
    // A tiny image: every handle box covers the point.
    let t = Transform { x: 100.0, y: 100.0, width: 10.0, height: 10.0, scale: 1.0 };
    assert_eq!(handle_at(pt(105.0, 105.0), &t, 10.0, PointerKind::Mouse), Some(Corner::Tl));
}

// =============================================================
// hit_test / hover_cursor
// =============================================================

#[test]
fn hit_test_prefers_handle_over_body() {
    assert_eq!(hit_test(pt(102.0, 52.0), &transform(), 10.0, PointerKind::Mouse), Some(HitPart::Handle(Corner::Tl)));
}

#[test]
fn hit_test_body() {
    assert_eq!(hit_test(pt(200.0, 100.0), &transform(), 10.0, PointerKind::Mouse), Some(HitPart::Body));
}

#[test]
fn hit_test_background() {
    assert_eq!(hit_test(pt(20.0, 20.0), &transform(), 10.0, PointerKind::Mouse), None);
}

#[test]
fn hover_cursor_matches_hit() {
    let t = transform();
    assert_eq!(hover_cursor(pt(300.0, 50.0), &t, 10.0, PointerKind::Mouse), Cursor::NeswResize);
    assert_eq!(hover_cursor(pt(200.0, 100.0), &t, 10.0, PointerKind::Mouse), Cursor::Grab);
    assert_eq!(hover_cursor(pt(0.0, 0.0), &t, 10.0, PointerKind::Mouse), Cursor::Default);
}
