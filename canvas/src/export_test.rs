use chrono::NaiveDate;
use image::Rgba;

use super::*;
use crate::config::EditorConfig;
use crate::engine::EngineCore;
use crate::model::{BackgroundStyle, Color, Frame, ImageInfo, Transform};
use crate::raster::RasterSurface;

fn gradient(w: u32, h: u32) -> RgbaImage {
    #[allow(clippy::cast_possible_truncation)]
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 255 / w) as u8, (y * 255 / h) as u8, 128, 255]))
}

fn scene<'a>(source: &'a RgbaImage, blur_px: f64) -> Scene<'a, RgbaImage> {
    Scene {
        frame: Frame::new(120, 80).unwrap(),
        source: Some((source, ImageInfo::new(source.width(), source.height()).unwrap())),
        transform: Transform { x: 30.0, y: 20.0, width: 64.0, height: 36.0, scale: 0.5 },
        style: BackgroundStyle { blur_px, background_scale: 1.0, fill: Color { r: 20, g: 20, b: 20 } },
        handle_size: 10.0,
    }
}

fn on_screen(scene: &Scene<'_, RgbaImage>, overlay: Overlay) -> RgbaImage {
    let mut surface = RasterSurface::new(scene.frame);
    render::draw(&mut surface, scene, overlay).unwrap();
    surface.into_image()
}

// =============================================================
// file_name
// =============================================================

#[test]
fn fixed_name() {
    let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(8, 5, 3).unwrap();
    assert_eq!(file_name(NamingPolicy::Fixed, now), "canvas-image.png");
}

#[test]
fn timestamped_name() {
    let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(8, 5, 3).unwrap();
    assert_eq!(file_name(NamingPolicy::Timestamped, now), "canvas-image-20261019-080503.png");
}

// =============================================================
// export_png
// =============================================================

#[test]
fn export_is_png_at_frame_size() {
    let src = gradient(128, 72);
    let bytes = export_png(&scene(&src, 5.0)).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (120, 80));
}

#[test]
fn export_without_blur_matches_screen_minus_handles() {
    let src = gradient(128, 72);
    let s = scene(&src, 0.0);
    let bytes = export_png(&s).unwrap();
    let exported = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(exported, on_screen(&s, Overlay::None));
    assert_ne!(exported, on_screen(&s, Overlay::Handles));
}

#[test]
fn export_without_an_image_is_refused() {
    let s: Scene<'_, RgbaImage> = Scene {
        frame: Frame::new(200, 60).unwrap(),
        source: None,
        transform: Transform::default(),
        style: BackgroundStyle::default(),
        handle_size: 10.0,
    };
    assert!(matches!(render_raster(&s), Err(Error::NoImage)));
    let err = export_png(&s).unwrap_err();
    assert_eq!(err.user_message(), "Please upload an image first.");
}

#[test]
fn export_of_a_fresh_engine_is_refused() {
    let core = EngineCore::default();
    assert!(matches!(export_png(&core.scene::<RgbaImage>(None)), Err(Error::NoImage)));
}

#[test]
fn zoomed_export_keeps_the_image_under_the_frame_centre() {
    // Left half red, right half blue; the seam lands on the frame centre.
    let src = RgbaImage::from_fn(2000, 2000, |x, _| {
        if x < 1000 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
    });
    let config = EditorConfig { canvas_width: 800, canvas_height: 600, ..Default::default() };
    let mut core = EngineCore::new(config).unwrap();
    core.set_image(ImageInfo::new(2000, 2000).unwrap());
    core.set_scale(5.0);
    let composite = render_raster(&core.scene(Some(&src))).unwrap();
    assert_eq!(composite.dimensions(), (800, 600));
    assert_eq!(*composite.get_pixel(380, 300), Rgba([255, 0, 0, 255]));
    assert_eq!(*composite.get_pixel(420, 300), Rgba([0, 0, 255, 255]));
}

#[test]
fn blurred_export_differs_from_sharp() {
    let src = gradient(128, 72);
    let sharp = render_raster(&scene(&src, 0.0)).unwrap();
    let blurred = render_raster(&scene(&src, 6.0)).unwrap();
    // Outside the foreground: fill vs. backdrop.
    assert_eq!(*sharp.get_pixel(2, 2), Rgba([20, 20, 20, 255]));
    assert_ne!(*blurred.get_pixel(2, 2), Rgba([20, 20, 20, 255]));
}
