#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::input::{Cursor, PointerKind};
use crate::model::Transform;

/// Which part of the foreground was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Corner),
}

/// A corner resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Tl,
    Tr,
    Bl,
    Br,
}

impl Corner {
    /// Hit-test order.
    pub const ALL: [Corner; 4] = [Corner::Tl, Corner::Tr, Corner::Bl, Corner::Br];

    /// Whether dragging this handle to the left makes the image wider.
    #[must_use]
    pub fn on_left(self) -> bool {
        matches!(self, Self::Tl | Self::Bl)
    }

    /// Whether the bottom edge stays fixed while this handle is dragged.
    #[must_use]
    pub fn on_top(self) -> bool {
        matches!(self, Self::Tl | Self::Tr)
    }

    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Tl | Self::Br => Cursor::NwseResize,
            Self::Tr | Self::Bl => Cursor::NeswResize,
        }
    }
}

/// Corner points of the foreground, rounded to whole pixels as drawn.
#[must_use]
pub fn handle_positions(t: &Transform) -> [(Corner, Point); 4] {
    let r = t.rect().rounded();
    [
        (Corner::Tl, Point::new(r.x, r.y)),
        (Corner::Tr, Point::new(r.right(), r.y)),
        (Corner::Bl, Point::new(r.x, r.bottom())),
        (Corner::Br, Point::new(r.right(), r.bottom())),
    ]
}

/// The first handle whose hit box contains `pt`, checked in [`Corner::ALL`] order.
#[must_use]
pub fn handle_at(pt: Point, t: &Transform, handle_size: f64, kind: PointerKind) -> Option<Corner> {
    let half = handle_size * kind.handle_tolerance() * 0.5;
    handle_positions(t)
        .into_iter()
        .find(|(_, h)| (pt.x - h.x).abs() <= half && (pt.y - h.y).abs() <= half)
        .map(|(corner, _)| corner)
}

/// Test what part of the foreground (if any) is under `pt`. Handles win over the body.
#[must_use]
pub fn hit_test(pt: Point, t: &Transform, handle_size: f64, kind: PointerKind) -> Option<HitPart> {
    if let Some(corner) = handle_at(pt, t, handle_size, kind) {
        return Some(HitPart::Handle(corner));
    }
    t.rect().contains(pt).then_some(HitPart::Body)
}

/// Cursor to show while hovering `pt` with no gesture in progress.
#[must_use]
pub fn hover_cursor(pt: Point, t: &Transform, handle_size: f64, kind: PointerKind) -> Cursor {
    match hit_test(pt, t, handle_size, kind) {
        Some(HitPart::Handle(corner)) => corner.cursor(),
        Some(HitPart::Body) => Cursor::Grab,
        None => Cursor::Default,
    }
}
