//! Gesture math: drag with edge magnetism, aspect-locked corner resize with
//! edge snapping, and centroid-anchored pinch zoom.
//!
//! Every function here is pure. It takes the snapshot recorded when the
//! gesture started plus the current pointer position(s) and returns the next
//! transform, so replaying the same move twice yields the same result.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::geom::Point;
use crate::hit::Corner;
use crate::model::{Frame, ImageInfo, Transform};

/// Snap one axis of a dragged rectangle to the frame edges.
///
/// The near edge is tested first and the far edge second, so when the
/// rectangle is within `snap` of both the far edge wins.
#[must_use]
pub fn snap_axis(target: f64, size: f64, frame_dim: f64, snap: f64) -> f64 {
    let mut out = target;
    if out.abs() < snap {
        out = 0.0;
    }
    if (out + size - frame_dim).abs() < snap {
        out = frame_dim - size;
    }
    out
}

/// Top-left position for a drag with the pointer at `pointer`.
#[must_use]
pub fn drag_to(pointer: Point, offset: Point, t: &Transform, frame: Frame, snap: f64) -> Point {
    Point {
        x: snap_axis(pointer.x - offset.x, t.width, frame.w(), snap),
        y: snap_axis(pointer.y - offset.y, t.height, frame.h(), snap),
    }
}

/// Inputs shared by every move of one resize gesture.
#[derive(Debug, Clone, Copy)]
pub struct ResizeCtx {
    pub corner: Corner,
    pub start: Point,
    pub orig: Transform,
    pub frame: Frame,
    pub image: ImageInfo,
    pub snap: f64,
    pub min_size: f64,
}

/// Transform for a corner resize with the pointer at `pointer`.
///
/// Width follows the horizontal pointer delta and height follows the image
/// aspect ratio. The corner opposite the dragged handle stays where it was
/// when the gesture began. At most one frame edge snaps per move, checked
/// left, right, top, bottom; the first match wins.
#[must_use]
pub fn resize_to(ctx: &ResizeCtx, pointer: Point) -> Transform {
    let ResizeCtx { corner, start, orig, image, min_size, .. } = *ctx;
    let aspect = image.aspect();
    let dx = pointer.x - start.x;

    let raw_w = (if corner.on_left() { orig.width - dx } else { orig.width + dx }).max(min_size);
    let raw_h = raw_w / aspect;
    let raw_x = if corner.on_left() { orig.x + (orig.width - raw_w) } else { orig.x };
    let raw_y = if corner.on_top() { orig.y + (orig.height - raw_h) } else { orig.y };

    let raw = Transform { x: raw_x, y: raw_y, width: raw_w, height: raw_h, scale: 0.0 };
    let mut next = snap_resize(ctx, &raw).unwrap_or(raw);

    next.width = next.width.max(min_size);
    next.height = next.height.max(min_size);
    next.scale = next.width / image.w();
    next
}

fn snap_resize(ctx: &ResizeCtx, raw: &Transform) -> Option<Transform> {
    let ResizeCtx { corner, orig, frame, image, snap, .. } = *ctx;
    let aspect = image.aspect();
    // y that keeps the bottom edge fixed for top handles, or the top edge for bottom handles.
    let anchored_y = |h: f64| if corner.on_top() { orig.y + orig.height - h } else { orig.y };
    let anchored_x = |w: f64| if corner.on_left() { orig.x + orig.width - w } else { orig.x };
    let snapped = |x: f64, y: f64, width: f64, height: f64| Some(Transform { x, y, width, height, scale: 0.0 });

    if corner.on_left() && raw.x.abs() < snap {
        let width = orig.width + orig.x;
        let height = width / aspect;
        return snapped(0.0, anchored_y(height), width, height);
    }
    if !corner.on_left() && (raw.rect().right() - frame.w()).abs() < snap {
        let width = frame.w() - raw.x;
        let height = width / aspect;
        return snapped(raw.x, anchored_y(height), width, height);
    }
    if corner.on_top() && raw.y.abs() < snap {
        let height = orig.height + orig.y;
        let width = height * aspect;
        return snapped(anchored_x(width), 0.0, width, height);
    }
    if !corner.on_top() && (raw.rect().bottom() - frame.h()).abs() < snap {
        let height = frame.h() - raw.y;
        let width = height * aspect;
        return snapped(anchored_x(width), raw.y, width, height);
    }
    None
}

/// Inputs shared by every move of one pinch gesture.
#[derive(Debug, Clone, Copy)]
pub struct PinchCtx {
    pub start_distance: f64,
    pub start_mid: Point,
    pub orig: Transform,
    pub image: ImageInfo,
    pub scale_min: f64,
    pub scale_max: f64,
}

/// Transform for a pinch whose fingers are now `distance` apart around `mid`.
///
/// The image point that was under the starting midpoint stays under the
/// current midpoint. Returns the original transform if the pinch started
/// with both fingers on the same spot.
#[must_use]
pub fn pinch_to(ctx: &PinchCtx, mid: Point, distance: f64) -> Transform {
    let PinchCtx { start_distance, start_mid, orig, image, scale_min, scale_max } = *ctx;
    if start_distance <= 0.0 {
        return orig;
    }
    let orig_scale = if orig.scale > 0.0 { orig.scale } else { orig.width / image.w() };
    if orig_scale <= 0.0 {
        return orig;
    }
    let scale = (orig_scale * distance / start_distance).max(scale_min).min(scale_max);
    let ratio = scale / orig_scale;
    Transform {
        x: mid.x - (start_mid.x - orig.x) * ratio,
        y: mid.y - (start_mid.y - orig.y) * ratio,
        width: image.w() * scale,
        height: image.h() * scale,
        scale,
    }
}
