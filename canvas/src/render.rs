//! Rendering: composites the frame from the current scene.
//!
//! [`draw`] holds the compositing order (fill, blurred backdrop, foreground,
//! handles) and is written once against the [`Surface`] trait. Two surfaces
//! implement it: [`CanvasSurface`] for the on-screen browser canvas and
//! [`crate::raster::RasterSurface`] for headless export. Neither mutates any
//! editor state.
//!
//! Drawing calls on [`web_sys::CanvasRenderingContext2d`] live here; `engine`
//! only acquires the context.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::PLACEHOLDER_TEXT;
use crate::geom::{Point, Rect};
use crate::hit::{self, Corner};
use crate::model::{BackgroundStyle, Color, Frame, ImageInfo, Transform};

/// Handle fill colour.
const HANDLE_FILL: &str = "rgba(0, 123, 255, 0.8)";

/// Handle outline and glyph colour.
const HANDLE_STROKE: &str = "rgba(255, 255, 255, 0.9)";

/// Placeholder label colour.
const PLACEHOLDER_FILL: &str = "#999";

/// A drawing target the compositor can paint onto.
pub trait Surface {
    /// Decoded source bitmap as this surface understands it.
    type Image;
    type Error;

    /// Clear the whole frame and paint it with `fill`.
    ///
    /// # Errors
    ///
    /// Surface-specific drawing failure.
    fn clear(&mut self, frame: Frame, fill: Color) -> Result<(), Self::Error>;

    /// Draw `text` centered in the frame.
    ///
    /// # Errors
    ///
    /// Surface-specific drawing failure.
    fn draw_placeholder(&mut self, frame: Frame, text: &str) -> Result<(), Self::Error>;

    /// Draw `image` stretched to `dest`, Gaussian-blurred by `blur_px` when positive.
    ///
    /// # Errors
    ///
    /// Surface-specific drawing failure.
    fn draw_image(&mut self, image: &Self::Image, dest: Rect, blur_px: f64) -> Result<(), Self::Error>;

    /// Draw one resize handle of side `size` centered on `center`.
    ///
    /// # Errors
    ///
    /// Surface-specific drawing failure.
    fn draw_handle(&mut self, center: Point, size: f64, corner: Corner) -> Result<(), Self::Error>;
}

/// Everything the compositor reads, borrowed for one draw.
#[derive(Debug)]
pub struct Scene<'a, I> {
    pub frame: Frame,
    /// The decoded image and its natural size, if one is loaded.
    pub source: Option<(&'a I, ImageInfo)>,
    pub transform: Transform,
    pub style: BackgroundStyle,
    pub handle_size: f64,
}

/// Whether [`draw`] paints the interactive overlay on top of the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Handles,
    None,
}

/// Draw the full scene.
///
/// # Errors
///
/// Propagates the first surface failure.
pub fn draw<S: Surface>(surface: &mut S, scene: &Scene<'_, S::Image>, overlay: Overlay) -> Result<(), S::Error> {
    // Layer 1: fill.
    surface.clear(scene.frame, scene.style.fill)?;

    let Some((image, info)) = scene.source else {
        return surface.draw_placeholder(scene.frame, PLACEHOLDER_TEXT);
    };

    // Layer 2: blurred backdrop.
    if scene.style.blur_px > 0.0 {
        let dest = backdrop_rect(scene.frame, info, &scene.transform, scene.style.background_scale);
        surface.draw_image(image, dest, scene.style.blur_px)?;
    }

    // Layer 3: foreground on whole pixels.
    surface.draw_image(image, scene.transform.rect().rounded(), 0.0)?;

    // Layer 4: handles.
    if overlay == Overlay::Handles {
        for (corner, center) in handle_centers(scene.frame, &scene.transform, scene.handle_size) {
            surface.draw_handle(center, scene.handle_size, corner)?;
        }
    }
    Ok(())
}

/// Where the blurred backdrop copy goes.
///
/// The image is cover-fitted to the frame, scaled by `background_scale`, and
/// positioned so the foreground's normalized center (clamped to `[0, 1]`)
/// lands at the same normalized spot of the backdrop.
#[must_use]
pub fn backdrop_rect(frame: Frame, image: ImageInfo, t: &Transform, background_scale: f64) -> Rect {
    let (cover_w, cover_h) = if image.aspect() > frame.aspect() {
        (frame.h() * image.aspect(), frame.h())
    } else {
        (frame.w(), frame.w() / image.aspect())
    };
    let width = cover_w * background_scale;
    let height = cover_h * background_scale;
    let center = t.center();
    let nx = (center.x / frame.w()).clamp(0.0, 1.0);
    let ny = (center.y / frame.h()).clamp(0.0, 1.0);
    Rect::new((frame.w() - width) * nx, (frame.h() - height) * ny, width, height)
}

/// Drawn handle centers, pulled inside the frame so every handle stays visible.
#[must_use]
pub fn handle_centers(frame: Frame, t: &Transform, handle_size: f64) -> [(Corner, Point); 4] {
    let half = handle_size * 0.5;
    hit::handle_positions(t).map(|(corner, p)| {
        let x = p.x.max(half).min(frame.w() - half);
        let y = p.y.max(half).min(frame.h() - half);
        (corner, Point::new(x, y))
    })
}

/// Diagonal glyph endpoints for a handle, matching its resize direction.
#[must_use]
pub fn glyph_segment(center: Point, size: f64, corner: Corner) -> (Point, Point) {
    let r = size * 0.3;
    match corner {
        Corner::Tl | Corner::Br => (Point::new(center.x - r, center.y - r), Point::new(center.x + r, center.y + r)),
        Corner::Tr | Corner::Bl => (Point::new(center.x - r, center.y + r), Point::new(center.x + r, center.y - r)),
    }
}

// =============================================================
// Browser canvas
// =============================================================

/// On-screen surface backed by a 2D canvas context.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface<'_> {
    type Image = HtmlImageElement;
    type Error = JsValue;

    fn clear(&mut self, frame: Frame, fill: Color) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, frame.w(), frame.h());
        self.ctx.set_fill_style_str(&fill.to_string());
        self.ctx.fill_rect(0.0, 0.0, frame.w(), frame.h());
        Ok(())
    }

    fn draw_placeholder(&mut self, frame: Frame, text: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(PLACEHOLDER_FILL);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_font("16px sans-serif");
        self.ctx.fill_text(text, frame.w() * 0.5, frame.h() * 0.5)
    }

    fn draw_image(&mut self, image: &HtmlImageElement, dest: Rect, blur_px: f64) -> Result<(), JsValue> {
        if blur_px > 0.0 {
            self.ctx.set_filter(&format!("blur({blur_px}px)"));
        }
        let result =
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, dest.x, dest.y, dest.width, dest.height);
        if blur_px > 0.0 {
            self.ctx.set_filter("none");
        }
        result
    }

    fn draw_handle(&mut self, center: Point, size: f64, corner: Corner) -> Result<(), JsValue> {
        let half = size * 0.5;
        self.ctx.set_fill_style_str(HANDLE_FILL);
        self.ctx.set_stroke_style_str(HANDLE_STROKE);
        self.ctx.set_line_width(1.0);
        self.ctx.fill_rect(center.x - half, center.y - half, size, size);
        self.ctx.stroke_rect(center.x - half, center.y - half, size, size);

        let (a, b) = glyph_segment(center, size, corner);
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.stroke();
        Ok(())
    }
}
