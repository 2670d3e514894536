//! Export: re-composite the scene without handles and encode it as PNG.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::io::Cursor;

use chrono::NaiveDateTime;
use image::{ImageFormat, RgbaImage};

use crate::consts::EXPORT_BASE_NAME;
use crate::error::Error;
use crate::raster::RasterSurface;
use crate::render::{self, Overlay, Scene};

/// MIME type of every export.
pub const EXPORT_MIME: &str = "image/png";

/// How exported files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Always `canvas-image.png`.
    #[default]
    Fixed,
    /// `canvas-image-YYYYMMDD-HHMMSS.png`.
    Timestamped,
}

/// Download file name for an export made at `now`.
#[must_use]
pub fn file_name(policy: NamingPolicy, now: NaiveDateTime) -> String {
    match policy {
        NamingPolicy::Fixed => format!("{EXPORT_BASE_NAME}.png"),
        NamingPolicy::Timestamped => format!("{EXPORT_BASE_NAME}-{}.png", now.format("%Y%m%d-%H%M%S")),
    }
}

/// Composite `scene` off-screen at the frame's exact size, without handles.
///
/// # Errors
///
/// Returns [`Error::NoImage`] when the scene has no source image, and
/// propagates surface failures.
pub fn render_raster(scene: &Scene<'_, RgbaImage>) -> Result<RgbaImage, Error> {
    if scene.source.is_none() {
        tracing::warn!("export requested with no image loaded");
        return Err(Error::NoImage);
    }
    let mut surface = RasterSurface::new(scene.frame);
    render::draw(&mut surface, scene, Overlay::None)?;
    Ok(surface.into_image())
}

/// Composite `scene` and encode it losslessly as PNG.
///
/// # Errors
///
/// Returns [`Error::NoImage`] for an empty scene and [`Error::Export`] if
/// encoding fails.
pub fn export_png(scene: &Scene<'_, RgbaImage>) -> Result<Vec<u8>, Error> {
    let composite = render_raster(scene)?;
    let mut bytes = Vec::new();
    composite.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).map_err(|e| {
        tracing::error!(error = %e, "png encode failed");
        Error::Export(e.to_string())
    })?;
    tracing::info!(
        width = composite.width(),
        height = composite.height(),
        bytes = bytes.len(),
        "composite exported"
    );
    Ok(bytes)
}
