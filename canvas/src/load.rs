//! Source image loading: MIME validation and decoding.
//!
//! A successful load yields a [`SourceImage`] that is never mutated; the
//! next successful load replaces it wholesale.

#[cfg(test)]
#[path = "load_test.rs"]
mod load_test;

use image::RgbaImage;

use crate::error::Error;
use crate::model::ImageInfo;

/// A decoded image and its natural size.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    info: ImageInfo,
}

impl SourceImage {
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[must_use]
    pub fn info(&self) -> ImageInfo {
        self.info
    }
}

/// Accept only `image/*` MIME types.
///
/// # Errors
///
/// Returns [`Error::InvalidFileType`] for anything else.
pub fn check_mime(mime: &str) -> Result<(), Error> {
    let is_image = mime
        .split('/')
        .next()
        .is_some_and(|top| top.trim().eq_ignore_ascii_case("image"))
        && mime.contains('/');
    if is_image {
        Ok(())
    } else {
        tracing::warn!(%mime, "rejected non-image file");
        Err(Error::InvalidFileType(mime.to_owned()))
    }
}

/// Validate `mime` and decode `bytes` into a [`SourceImage`].
///
/// # Errors
///
/// Returns [`Error::InvalidFileType`] for a non-image MIME type and
/// [`Error::Decode`] if the bytes are not a readable image.
pub fn decode(bytes: &[u8], mime: &str) -> Result<SourceImage, Error> {
    check_mime(mime)?;
    let decoded = image::load_from_memory(bytes).map_err(|e| {
        tracing::warn!(error = %e, %mime, "image decode failed");
        Error::Decode(e.to_string())
    })?;
    let pixels = decoded.to_rgba8();
    let info = ImageInfo::new(pixels.width(), pixels.height())?;
    tracing::info!(width = info.natural_width(), height = info.natural_height(), %mime, "image loaded");
    Ok(SourceImage { pixels, info })
}
