#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Frame
// =============================================================

#[test]
fn frame_default_is_valid() {
    let f = Frame::default();
    assert!(Frame::new(f.width(), f.height()).is_ok());
}

#[test]
fn frame_accepts_minimum() {
    let f = Frame::new(50, 50).unwrap();
    assert_eq!((f.width(), f.height()), (50, 50));
}

#[test]
fn frame_rejects_below_minimum() {
    assert!(matches!(Frame::new(49, 600), Err(Error::InvalidFrame { width: 49, height: 600, min: 50 })));
    assert!(matches!(Frame::new(600, 10), Err(Error::InvalidFrame { .. })));
}

#[test]
fn frame_aspect() {
    let f = Frame::new(800, 400).unwrap();
    assert_eq!(f.aspect(), 2.0);
}

// =============================================================
// ImageInfo
// =============================================================

#[test]
fn image_info_rejects_empty() {
    assert!(matches!(ImageInfo::new(0, 10), Err(Error::Decode(_))));
    assert!(matches!(ImageInfo::new(10, 0), Err(Error::Decode(_))));
}

#[test]
fn image_info_aspect() {
    let info = ImageInfo::new(1600, 900).unwrap();
    assert!((info.aspect() - 16.0 / 9.0).abs() < 1e-12);
}

// =============================================================
// Transform
// =============================================================

#[test]
fn transform_default_is_uninitialized() {
    assert!(!Transform::default().is_initialized());
}

#[test]
fn set_from_size_derives_scale_and_anchors() {
    let frame = Frame::new(800, 600).unwrap();
    let image = ImageInfo::new(400, 200).unwrap();
    let mut t = Transform::default();
    t.set_from_size(200.0, 100.0, Anchor::BottomRight, frame, image, 10.0);
    assert_eq!(t.scale, 0.5);
    assert_eq!(t.x, 600.0);
    assert_eq!(t.y, 500.0);
    assert!(t.is_initialized());
}

#[test]
fn set_from_size_floors_at_minimum() {
    let frame = Frame::new(800, 600).unwrap();
    let image = ImageInfo::new(400, 200).unwrap();
    let mut t = Transform::default();
    t.set_from_size(2.0, 1.0, Anchor::TopLeft, frame, image, 10.0);
    assert_eq!(t.width, 10.0);
    assert_eq!(t.height, 10.0);
}

#[test]
fn rescale_about_center_keeps_center() {
    let image = ImageInfo::new(400, 200).unwrap();
    let mut t = Transform { x: 100.0, y: 100.0, width: 200.0, height: 100.0, scale: 0.5 };
    let before = t.center();
    t.rescale_about_center(1.0, image);
    assert_eq!(t.center(), before);
    assert_eq!(t.width, 400.0);
    assert_eq!(t.height, 200.0);
    assert_eq!(t.x, 0.0);
}

// =============================================================
// Color
// =============================================================

#[test]
fn color_parses_long_form() {
    let c: Color = "#1f2a3B".parse().unwrap();
    assert_eq!(c, Color { r: 0x1f, g: 0x2a, b: 0x3b });
}

#[test]
fn color_parses_short_form() {
    let c: Color = "#fa0".parse().unwrap();
    assert_eq!(c, Color { r: 0xff, g: 0xaa, b: 0x00 });
}

#[test]
fn color_rejects_garbage() {
    for bad in ["", "ffffff", "#ff", "#gggggg", "#12345", "#ffé"] {
        assert!(matches!(bad.parse::<Color>(), Err(Error::InvalidColor(_))), "{bad}");
    }
}

#[test]
fn color_displays_lowercase_hex() {
    assert_eq!(Color { r: 0, g: 0x7b, b: 0xff }.to_string(), "#007bff");
}

#[test]
fn color_serde_as_string() {
    let json = serde_json::to_string(&Color::WHITE).unwrap();
    assert_eq!(json, "\"#ffffff\"");
    let back: Color = serde_json::from_str("\"#000\"").unwrap();
    assert_eq!(back, Color { r: 0, g: 0, b: 0 });
    assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
}
