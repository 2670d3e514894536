//! Data model: the canvas frame, the loaded image's natural size, the
//! foreground transform, and the backdrop style.
//!
//! `Transform` is the single source of truth for where the foreground image
//! sits on the frame. The input engine, the alignment helpers, and the scale
//! slider write it; the renderer and the exporter only read it.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::align::Anchor;
use crate::consts::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, MIN_FRAME_DIM};
use crate::error::Error;
use crate::geom::{Point, Rect};

/// The fixed-size output surface. Both dimensions are at least [`MIN_FRAME_DIM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
}

impl Default for Frame {
    fn default() -> Self {
        Self { width: DEFAULT_FRAME_WIDTH, height: DEFAULT_FRAME_HEIGHT }
    }
}

impl Frame {
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if either dimension is below [`MIN_FRAME_DIM`].
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width < MIN_FRAME_DIM || height < MIN_FRAME_DIM {
            return Err(Error::InvalidFrame { width, height, min: MIN_FRAME_DIM });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn w(&self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn h(&self) -> f64 {
        f64::from(self.height)
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.w() / self.h()
    }
}

/// Natural pixel size of the loaded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    natural_width: u32,
    natural_height: u32,
}

impl ImageInfo {
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for an image with no pixels.
    pub fn new(natural_width: u32, natural_height: u32) -> Result<Self, Error> {
        if natural_width == 0 || natural_height == 0 {
            return Err(Error::Decode(format!("image has no pixels ({natural_width}x{natural_height})")));
        }
        Ok(Self { natural_width, natural_height })
    }

    #[must_use]
    pub fn natural_width(&self) -> u32 {
        self.natural_width
    }

    #[must_use]
    pub fn natural_height(&self) -> u32 {
        self.natural_height
    }

    #[must_use]
    pub fn w(&self) -> f64 {
        f64::from(self.natural_width)
    }

    #[must_use]
    pub fn h(&self) -> f64 {
        f64::from(self.natural_height)
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.w() / self.h()
    }
}

/// Where the foreground image is drawn within the frame.
///
/// `scale` is always `width / natural_width`; the aspect ratio of the source
/// is preserved so `height == natural_height * scale` outside of the
/// minimum-size floor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Transform {
    /// A transform with zero size has never been laid out for the current image.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Set the drawn size and place the rectangle so its `anchor` point lands
    /// on the frame's matching point.
    pub fn set_from_size(
        &mut self,
        width: f64,
        height: f64,
        anchor: Anchor,
        frame: Frame,
        image: ImageInfo,
        min_size: f64,
    ) {
        self.width = width.max(min_size);
        self.height = height.max(min_size);
        self.scale = self.width / image.w();
        let (nx, ny) = anchor.norm();
        self.x = (frame.w() - self.width) * nx;
        self.y = (frame.h() - self.height) * ny;
    }

    /// Resize to `scale` around the current center.
    pub fn rescale_about_center(&mut self, scale: f64, image: ImageInfo) {
        let center = self.center();
        self.scale = scale;
        self.width = image.w() * scale;
        self.height = image.h() * scale;
        self.x = center.x - self.width * 0.5;
        self.y = center.y - self.height * 0.5;
    }
}

/// An opaque RGB colour, written as `#rrggbb` (or the `#rgb` shorthand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 0xff, g: 0xff, b: 0xff };

    #[must_use]
    pub fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self { r: channel(&hex[0..2])?, g: channel(&hex[2..4])?, b: channel(&hex[4..6])? }),
            3 => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 0x11);
                Ok(Self { r: short(0)?, g: short(1)?, b: short(2)? })
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Style of everything behind the foreground image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStyle {
    /// Gaussian blur radius for the backdrop copy. Zero disables the backdrop.
    pub blur_px: f64,
    /// Multiplier applied to the cover-fit backdrop size.
    pub background_scale: f64,
    /// Solid fill painted before anything else.
    pub fill: Color,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self { blur_px: 0.0, background_scale: 1.0, fill: Color::WHITE }
    }
}
