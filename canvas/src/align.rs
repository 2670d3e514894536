//! Alignment and fit helpers.
//!
//! Pure functions from (frame, image, current transform) to a new transform.
//! The nine [`Anchor`]s place the foreground against a corner, an edge
//! midpoint, or the center of the frame.

#[cfg(test)]
#[path = "align_test.rs"]
mod align_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::INSCRIBE_MARGIN;
use crate::error::Error;
use crate::model::{Frame, ImageInfo, Transform};

/// Named placement of the foreground within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    /// Normalized `(x, y)` position of this anchor, each in `{0, 0.5, 1}`.
    #[must_use]
    pub fn norm(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Left => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Right => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Kebab-case name, as used by the host UI and config files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::InvalidAnchor(s.to_owned()))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the foreground is sized the first time an image is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InitialFit {
    /// Fit inside the frame, touching `margin` of the constraining dimension.
    Inscribe { margin: f64 },
    /// Fit inside the frame, touching the constraining dimension exactly.
    Fill,
}

impl Default for InitialFit {
    fn default() -> Self {
        Self::Inscribe { margin: INSCRIBE_MARGIN }
    }
}

/// Size `(width, height)` the image gets when first laid out in `frame`.
#[must_use]
pub fn initial_size(frame: Frame, image: ImageInfo, fit: InitialFit) -> (f64, f64) {
    let margin = match fit {
        InitialFit::Inscribe { margin } => margin,
        InitialFit::Fill => 1.0,
    };
    if image.aspect() > frame.aspect() {
        let width = frame.w() * margin;
        (width, image.h() * (width / image.w()))
    } else {
        let height = frame.h() * margin;
        (image.w() * (height / image.h()), height)
    }
}

/// Place the foreground against `anchor`.
///
/// The current size is kept when `current` is initialized; otherwise the
/// size comes from [`initial_size`].
#[must_use]
pub fn align_to(
    current: &Transform,
    anchor: Anchor,
    frame: Frame,
    image: ImageInfo,
    fit: InitialFit,
    min_size: f64,
) -> Transform {
    let (width, height) = if current.is_initialized() {
        (current.width, current.height)
    } else {
        initial_size(frame, image, fit)
    };
    let mut next = *current;
    next.set_from_size(width, height, anchor, frame, image, min_size);
    next
}

/// Match the frame width exactly and center vertically.
#[must_use]
pub fn fit_width(frame: Frame, image: ImageInfo, min_size: f64) -> Transform {
    let mut next = Transform::default();
    next.set_from_size(frame.w(), frame.w() / image.aspect(), Anchor::Center, frame, image, min_size);
    next
}

/// Match the frame height exactly and center horizontally.
#[must_use]
pub fn fit_height(frame: Frame, image: ImageInfo, min_size: f64) -> Transform {
    let mut next = Transform::default();
    next.set_from_size(frame.h() * image.aspect(), frame.h(), Anchor::Center, frame, image, min_size);
    next
}
