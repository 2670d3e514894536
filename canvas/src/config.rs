//! Editor configuration: the live values the host UI exposes (canvas size,
//! backdrop style, scale limits, anchor) plus interaction tuning.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Size presets from the host's dropdown are parsed here too.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::align::{Anchor, InitialFit};
use crate::consts::{
    DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, HANDLE_SIZE_PX, MIN_FRAME_DIM, SCALE_MAX, SCALE_MIN, SNAP_THRESHOLD_PX,
};
use crate::error::Error;
use crate::model::{BackgroundStyle, Color, Frame};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Backdrop blur radius in pixels; `0` turns the backdrop off.
    pub blur_px: f64,
    pub background_scale: f64,
    pub fill: Color,
    pub scale_min: f64,
    pub scale_max: f64,
    pub anchor: Anchor,
    pub snap_threshold: f64,
    /// Drawn handle size; also the smallest width/height a resize can reach.
    pub handle_size: f64,
    pub initial_fit: InitialFit,
    /// Whether a pointer-down on empty canvas (with an image loaded) asks for a new file.
    pub background_click_opens_picker: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_FRAME_WIDTH,
            canvas_height: DEFAULT_FRAME_HEIGHT,
            blur_px: 0.0,
            background_scale: 1.0,
            fill: Color::WHITE,
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            anchor: Anchor::Center,
            snap_threshold: SNAP_THRESHOLD_PX,
            handle_size: HANDLE_SIZE_PX,
            initial_fit: InitialFit::default(),
            background_click_opens_picker: false,
        }
    }
}

impl EditorConfig {
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `json` is not a valid config document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if the configured size is too small.
    pub fn frame(&self) -> Result<Frame, Error> {
        Frame::new(self.canvas_width, self.canvas_height)
    }

    #[must_use]
    pub fn style(&self) -> BackgroundStyle {
        BackgroundStyle {
            blur_px: self.blur_px.max(0.0),
            background_scale: self.background_scale,
            fill: self.fill,
        }
    }

    /// Clamp `scale` into `[scale_min, scale_max]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.scale_min).min(self.scale_max)
    }
}

/// A canvas size preset from the host's dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePreset {
    /// `"WxH"`: both dimensions fixed.
    Fixed { width: u32, height: u32 },
    /// `"aspect_X_Y"`: keep the current width, derive the height.
    Aspect { x: u32, y: u32 },
}

impl FromStr for SizePreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPreset(s.to_owned());
        if let Some(ratio) = s.strip_prefix("aspect_") {
            let (x, y) = ratio.split_once('_').ok_or_else(invalid)?;
            let x: u32 = x.parse().map_err(|_| invalid())?;
            let y: u32 = y.parse().map_err(|_| invalid())?;
            if x == 0 || y == 0 {
                return Err(invalid());
            }
            return Ok(Self::Aspect { x, y });
        }
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let width = w.parse().map_err(|_| invalid())?;
        let height = h.parse().map_err(|_| invalid())?;
        Ok(Self::Fixed { width, height })
    }
}

impl SizePreset {
    /// Frame this preset yields when applied to `current`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPreset`] if the result would be smaller than the minimum frame.
    pub fn apply(self, current: Frame) -> Result<Frame, Error> {
        let (width, height) = match self {
            Self::Fixed { width, height } => (width, height),
            Self::Aspect { x, y } => {
                let ratio = f64::from(x) / f64::from(y);
                let height = (current.w() / ratio).round();
                (current.width(), float_to_dim(height))
            }
        };
        if width < MIN_FRAME_DIM || height < MIN_FRAME_DIM {
            tracing::warn!(?self, width, height, "preset resulted in invalid dimensions");
            return Err(Error::InvalidPreset(format!("{width}x{height} is below {MIN_FRAME_DIM}x{MIN_FRAME_DIM}")));
        }
        Frame::new(width, height)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_dim(v: f64) -> u32 {
    v.clamp(0.0, f64::from(u32::MAX)) as u32
}
