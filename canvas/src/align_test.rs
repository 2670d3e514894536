#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::HANDLE_SIZE_PX;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn frame(w: u32, h: u32) -> Frame {
    Frame::new(w, h).unwrap()
}

fn image(w: u32, h: u32) -> ImageInfo {
    ImageInfo::new(w, h).unwrap()
}

fn laid_out(anchor: Anchor) -> Transform {
    align_to(
        &Transform::default(),
        anchor,
        frame(800, 600),
        image(1600, 900),
        InitialFit::default(),
        HANDLE_SIZE_PX,
    )
}

// =============================================================
// Anchor
// =============================================================

#[test]
fn anchor_default_is_center() {
    assert_eq!(Anchor::default(), Anchor::Center);
}

#[test]
fn anchor_names_round_trip_through_from_str() {
    for anchor in Anchor::ALL {
        assert_eq!(anchor.name().parse::<Anchor>().unwrap(), anchor);
    }
}

#[test]
fn anchor_unknown_name_is_rejected() {
    let err = "middle".parse::<Anchor>().unwrap_err();
    assert!(matches!(err, Error::InvalidAnchor(ref s) if s == "middle"));
}

#[test]
fn anchor_serde_uses_kebab_case() {
    let json = serde_json::to_string(&Anchor::BottomRight).unwrap();
    assert_eq!(json, "\"bottom-right\"");
    let back: Anchor = serde_json::from_str("\"top-left\"").unwrap();
    assert_eq!(back, Anchor::TopLeft);
}

#[test]
fn anchor_norms_cover_the_grid() {
    assert_eq!(Anchor::TopLeft.norm(), (0.0, 0.0));
    assert_eq!(Anchor::Top.norm(), (0.5, 0.0));
    assert_eq!(Anchor::Right.norm(), (1.0, 0.5));
    assert_eq!(Anchor::BottomRight.norm(), (1.0, 1.0));
}

// =============================================================
// initial_size
// =============================================================

#[test]
fn initial_size_wide_image_constrained_by_width() {
    let (w, h) = initial_size(frame(800, 600), image(1600, 900), InitialFit::default());
    assert!(approx_eq(w, 720.0));
    assert!(approx_eq(h, 405.0));
}

#[test]
fn initial_size_tall_image_constrained_by_height() {
    let (w, h) = initial_size(frame(800, 600), image(1000, 2000), InitialFit::default());
    assert!(approx_eq(h, 540.0));
    assert!(approx_eq(w, 270.0));
}

#[test]
fn initial_size_fill_touches_constraining_dimension() {
    let (w, h) = initial_size(frame(800, 600), image(1600, 900), InitialFit::Fill);
    assert!(approx_eq(w, 800.0));
    assert!(approx_eq(h, 450.0));
}

// =============================================================
// align_to
// =============================================================

#[test]
fn scenario_top_left_on_first_layout() {
    let t = laid_out(Anchor::TopLeft);
    assert_eq!(t.x, 0.0);
    assert_eq!(t.y, 0.0);
    assert!(approx_eq(t.width, 720.0));
    assert!(approx_eq(t.height, 720.0 * 900.0 / 1600.0));
    assert!(approx_eq(t.scale, 0.45));
}

#[test]
fn align_places_every_anchor_at_its_normalized_position() {
    let f = frame(800, 600);
    for anchor in Anchor::ALL {
        let t = laid_out(anchor);
        let (nx, ny) = anchor.norm();
        assert!(approx_eq(t.x / (f.w() - t.width), nx), "{anchor}: x");
        assert!(approx_eq(t.y / (f.h() - t.height), ny), "{anchor}: y");
    }
}

#[test]
fn align_keeps_size_of_initialized_transform() {
    let current = Transform { x: 33.0, y: 44.0, width: 200.0, height: 112.5, scale: 0.125 };
    let t = align_to(&current, Anchor::BottomRight, frame(800, 600), image(1600, 900), InitialFit::default(), 10.0);
    assert_eq!(t.width, 200.0);
    assert_eq!(t.height, 112.5);
    assert_eq!(t.x, 600.0);
    assert_eq!(t.y, 487.5);
}

#[test]
fn align_center_of_oversized_image_goes_negative() {
    let current = Transform { x: 0.0, y: 0.0, width: 1000.0, height: 800.0, scale: 1.0 };
    let t = align_to(&current, Anchor::Center, frame(800, 600), image(1000, 800), InitialFit::default(), 10.0);
    assert_eq!(t.x, -100.0);
    assert_eq!(t.y, -100.0);
}

// =============================================================
// fit_width / fit_height
// =============================================================

#[test]
fn fit_width_matches_frame_and_centers_vertically() {
    let t = fit_width(frame(800, 600), image(1600, 900), 10.0);
    assert_eq!(t.width, 800.0);
    assert!(approx_eq(t.height, 450.0));
    assert_eq!(t.x, 0.0);
    assert!(approx_eq(t.y, 75.0));
    assert!(approx_eq(t.scale, 0.5));
}

#[test]
fn fit_height_matches_frame_and_centers_horizontally() {
    let t = fit_height(frame(800, 600), image(1600, 900), 10.0);
    assert_eq!(t.height, 600.0);
    assert!(approx_eq(t.width, 600.0 * 16.0 / 9.0));
    assert!(approx_eq(t.x, (800.0 - t.width) / 2.0));
    assert_eq!(t.y, 0.0);
}

#[test]
fn fit_preserves_aspect_ratio() {
    let img = image(1234, 567);
    for t in [fit_width(frame(640, 480), img, 10.0), fit_height(frame(640, 480), img, 10.0)] {
        assert!(approx_eq(t.height / t.width, 567.0 / 1234.0));
    }
}
