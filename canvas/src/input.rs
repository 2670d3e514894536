//! Input model: pointer sources, cursor affordances, input events, and the
//! gesture state machine.
//!
//! `InputEvent` is the single currency the host feeds into the engine, whether
//! it came from a mouse, a pen, or a touchscreen. `InputState` is the active
//! gesture tracked between pointer-down and pointer-up, carrying the snapshot
//! taken when the gesture began so every move is computed from the same base.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MOUSE_HANDLE_TOLERANCE, TOUCH_HANDLE_TOLERANCE};
use crate::geom::Point;
use crate::hit::Corner;
use crate::model::Transform;

/// Which kind of device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Handle hit box side as a multiple of the handle size.
    ///
    /// Fingers are imprecise, so touch gets a larger box.
    #[must_use]
    pub fn handle_tolerance(self) -> f64 {
        match self {
            Self::Mouse | Self::Pen => MOUSE_HANDLE_TOLERANCE,
            Self::Touch => TOUCH_HANDLE_TOLERANCE,
        }
    }
}

/// Cursor affordance the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
    /// Diagonal resize for the top-left and bottom-right handles.
    NwseResize,
    /// Diagonal resize for the top-right and bottom-left handles.
    NeswResize,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}

/// One input event, in frame coordinates.
///
/// Touch variants carry the full list of touches still on the surface after
/// the event (the browser's `TouchEvent.touches`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        point: Point,
        #[serde(default)]
        kind: PointerKind,
    },
    PointerMove {
        point: Point,
        #[serde(default)]
        kind: PointerKind,
    },
    PointerUp {
        point: Point,
        #[serde(default)]
        kind: PointerKind,
    },
    PointerCancel,
    PointerLeave,
    TouchStart {
        touches: Vec<Point>,
    },
    TouchMove {
        touches: Vec<Point>,
    },
    TouchEnd {
        touches: Vec<Point>,
    },
    TouchCancel,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to compute the
/// next transform from the pointer position alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The foreground is following the pointer.
    Dragging {
        /// Pointer position minus the foreground's top-left at grab time.
        offset: Point,
    },
    /// A corner handle is being dragged; the opposite corner stays put.
    Resizing {
        /// Which handle is being dragged.
        corner: Corner,
        /// Pointer position at the start of the resize.
        start: Point,
        /// Transform at the start of the resize.
        orig: Transform,
    },
    /// Two fingers are zooming the foreground around their midpoint.
    Pinching {
        /// Finger distance at the start of the pinch.
        start_distance: f64,
        /// Finger midpoint at the start of the pinch.
        start_mid: Point,
        /// Transform at the start of the pinch.
        orig: Transform,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
