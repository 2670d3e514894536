use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, DomException, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};

use crate::align::{self, Anchor};
use crate::config::{EditorConfig, SizePreset};
use crate::error::Error;
use crate::export::EXPORT_MIME;
use crate::geom::Point;
use crate::gesture::{self, PinchCtx, ResizeCtx};
use crate::hit::{self, HitPart};
use crate::input::{Cursor, InputEvent, InputState, PointerKind};
use crate::model::{BackgroundStyle, Color, Frame, ImageInfo, Transform};
use crate::render::{self, CanvasSurface, Overlay, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open the host's file picker.
    RequestFilePicker,
    SetCursor(Cursor),
    RenderNeeded,
}

/// Editor state and every transition that doesn't need the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: EditorConfig,
    pub input: InputState,
    frame: Frame,
    image: Option<ImageInfo>,
    transform: Transform,
    anchor: Anchor,
    cursor: Cursor,
}

impl Default for EngineCore {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            anchor: config.anchor,
            config,
            input: InputState::default(),
            frame: Frame::default(),
            image: None,
            transform: Transform::default(),
            cursor: Cursor::default(),
        }
    }
}

impl EngineCore {
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if the configured canvas is too small.
    pub fn new(config: EditorConfig) -> Result<Self, Error> {
        let frame = config.frame()?;
        Ok(Self { frame, anchor: config.anchor, config, ..Self::default() })
    }

    // --- Image ---

    /// Adopt a freshly decoded image and lay it out against the current anchor.
    pub fn set_image(&mut self, image: ImageInfo) -> Vec<Action> {
        self.image = Some(image);
        self.input = InputState::Idle;
        self.transform = align::align_to(
            &Transform::default(),
            self.anchor,
            self.frame,
            image,
            self.config.initial_fit,
            self.min_size(),
        );
        tracing::info!(
            width = image.natural_width(),
            height = image.natural_height(),
            anchor = %self.anchor,
            "image laid out"
        );
        vec![Action::RenderNeeded]
    }

    /// Forget the loaded image (after a failed load, for instance).
    pub fn clear_image(&mut self) -> Vec<Action> {
        self.image = None;
        self.transform = Transform::default();
        self.input = InputState::Idle;
        let mut actions = self.set_cursor(Cursor::Default);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Frame ---

    /// Resize the canvas, keeping the foreground's size and re-applying the last anchor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if either dimension is below the minimum.
    pub fn set_frame(&mut self, width: u32, height: u32) -> Result<Vec<Action>, Error> {
        self.frame = Frame::new(width, height)?;
        self.config.canvas_width = width;
        self.config.canvas_height = height;
        if let Some(image) = self.image {
            self.transform = align::align_to(
                &self.transform,
                self.anchor,
                self.frame,
                image,
                self.config.initial_fit,
                self.min_size(),
            );
        }
        tracing::debug!(width, height, "frame resized");
        Ok(vec![Action::RenderNeeded])
    }

    /// Apply a preset string from the size dropdown (`"1080x1080"`, `"aspect_16_9"`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPreset`] if the string is malformed or the
    /// resulting frame is too small.
    pub fn apply_preset(&mut self, preset: &str) -> Result<Vec<Action>, Error> {
        let next = preset.parse::<SizePreset>()?.apply(self.frame)?;
        self.set_frame(next.width(), next.height())
    }

    // --- Layout ---

    /// Snap the foreground against `anchor`; later frame resizes reuse it.
    pub fn align(&mut self, anchor: Anchor) -> Vec<Action> {
        self.anchor = anchor;
        let Some(image) = self.image else {
            return Vec::new();
        };
        self.transform =
            align::align_to(&self.transform, anchor, self.frame, image, self.config.initial_fit, self.min_size());
        vec![Action::RenderNeeded]
    }

    pub fn fit_width(&mut self) -> Vec<Action> {
        let Some(image) = self.image else {
            return Vec::new();
        };
        self.anchor = Anchor::Center;
        self.transform = align::fit_width(self.frame, image, self.min_size());
        vec![Action::RenderNeeded]
    }

    pub fn fit_height(&mut self) -> Vec<Action> {
        let Some(image) = self.image else {
            return Vec::new();
        };
        self.anchor = Anchor::Center;
        self.transform = align::fit_height(self.frame, image, self.min_size());
        vec![Action::RenderNeeded]
    }

    /// Set the foreground scale from the slider, keeping its center fixed.
    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        let Some(image) = self.image else {
            return Vec::new();
        };
        self.transform.rescale_about_center(self.config.clamp_scale(scale), image);
        vec![Action::RenderNeeded]
    }

    // --- Background style ---

    pub fn set_blur(&mut self, blur_px: f64) -> Vec<Action> {
        self.config.blur_px = blur_px.max(0.0);
        vec![Action::RenderNeeded]
    }

    pub fn set_background_scale(&mut self, scale: f64) -> Vec<Action> {
        if scale > 0.0 {
            self.config.background_scale = scale;
        }
        vec![Action::RenderNeeded]
    }

    pub fn set_fill(&mut self, fill: Color) -> Vec<Action> {
        self.config.fill = fill;
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Single entry point for every input source.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { point, kind } => self.on_pointer_down(*point, *kind),
            InputEvent::PointerMove { point, kind } => self.on_pointer_move(*point, *kind),
            InputEvent::PointerUp { point, kind } => self.on_pointer_up(*point, *kind),
            InputEvent::PointerCancel => self.on_pointer_cancel(),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::TouchStart { touches } => self.on_touch_start(touches),
            InputEvent::TouchMove { touches } => self.on_touch_move(touches),
            InputEvent::TouchEnd { touches } => self.on_touch_end(touches),
            InputEvent::TouchCancel => self.on_touch_cancel(),
        }
    }

    pub fn on_pointer_down(&mut self, pt: Point, kind: PointerKind) -> Vec<Action> {
        if self.image.is_none() {
            return vec![Action::RequestFilePicker];
        }
        match hit::hit_test(pt, &self.transform, self.config.handle_size, kind) {
            Some(HitPart::Handle(corner)) => {
                self.input = InputState::Resizing { corner, start: pt, orig: self.transform };
                tracing::debug!(?corner, x = pt.x, y = pt.y, "resize started");
                self.set_cursor(corner.cursor())
            }
            Some(HitPart::Body) => {
                let offset = Point::new(pt.x - self.transform.x, pt.y - self.transform.y);
                self.input = InputState::Dragging { offset };
                tracing::debug!(x = pt.x, y = pt.y, "drag started");
                self.set_cursor(Cursor::Grabbing)
            }
            None => {
                self.input = InputState::Idle;
                if self.config.background_click_opens_picker {
                    vec![Action::RequestFilePicker]
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, pt: Point, kind: PointerKind) -> Vec<Action> {
        let Some(image) = self.image else {
            return Vec::new();
        };
        match self.input {
            InputState::Idle => {
                let cursor = hit::hover_cursor(pt, &self.transform, self.config.handle_size, kind);
                self.set_cursor(cursor)
            }
            InputState::Dragging { offset } => {
                let to = gesture::drag_to(pt, offset, &self.transform, self.frame, self.config.snap_threshold);
                self.transform.x = to.x;
                self.transform.y = to.y;
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { corner, start, orig } => {
                let ctx = ResizeCtx {
                    corner,
                    start,
                    orig,
                    frame: self.frame,
                    image,
                    snap: self.config.snap_threshold,
                    min_size: self.min_size(),
                };
                self.transform = gesture::resize_to(&ctx, pt);
                vec![Action::RenderNeeded]
            }
            InputState::Pinching { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, pt: Point, kind: PointerKind) -> Vec<Action> {
        self.end_gesture("pointer up");
        if self.image.is_none() {
            return Vec::new();
        }
        let cursor = hit::hover_cursor(pt, &self.transform, self.config.handle_size, kind);
        self.set_cursor(cursor)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.end_gesture("pointer cancel");
        self.set_cursor(Cursor::Default)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture("pointer leave");
        self.set_cursor(Cursor::Default)
    }

    /// `touches` is every touch still on the surface, this one included.
    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches {
            [] => Vec::new(),
            [one] => self.on_pointer_down(*one, PointerKind::Touch),
            [a, b, ..] => {
                self.start_pinch(*a, *b);
                Vec::new()
            }
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let Some(image) = self.image else {
            return Vec::new();
        };
        match (self.input, touches) {
            (InputState::Pinching { start_distance, start_mid, orig }, [a, b, ..]) => {
                let ctx = PinchCtx {
                    start_distance,
                    start_mid,
                    orig,
                    image,
                    scale_min: self.config.scale_min,
                    scale_max: self.config.scale_max,
                };
                self.transform = gesture::pinch_to(&ctx, a.midpoint(*b), a.distance(*b));
                vec![Action::RenderNeeded]
            }
            (_, [one]) => self.on_pointer_move(*one, PointerKind::Touch),
            _ => Vec::new(),
        }
    }

    /// `remaining` is the touches still down after the release.
    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        match (self.input, remaining) {
            (_, []) => {
                self.end_gesture("touch end");
                self.set_cursor(Cursor::Default)
            }
            (InputState::Pinching { .. }, [one]) => {
                if self.image.is_some() && self.transform.rect().contains(*one) {
                    let offset = Point::new(one.x - self.transform.x, one.y - self.transform.y);
                    self.input = InputState::Dragging { offset };
                    tracing::debug!(x = one.x, y = one.y, "pinch handed over to drag");
                } else {
                    self.end_gesture("pinch released");
                }
                Vec::new()
            }
            (_, [a, b, ..]) => {
                self.start_pinch(*a, *b);
                Vec::new()
            }
            (_, [_]) => Vec::new(),
        }
    }

    pub fn on_touch_cancel(&mut self) -> Vec<Action> {
        self.end_gesture("touch cancel");
        self.set_cursor(Cursor::Default)
    }

    // --- Queries ---

    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    #[must_use]
    pub fn image(&self) -> Option<ImageInfo> {
        self.image
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn style(&self) -> BackgroundStyle {
        self.config.style()
    }

    /// Borrow everything the renderer needs, pairing the caller's decoded
    /// pixels with the loaded image's natural size.
    #[must_use]
    pub fn scene<'a, I>(&self, pixels: Option<&'a I>) -> Scene<'a, I> {
        Scene {
            frame: self.frame,
            source: pixels.zip(self.image),
            transform: self.transform,
            style: self.style(),
            handle_size: self.config.handle_size,
        }
    }

    /// Like [`EngineCore::scene`], for export: an empty editor has nothing
    /// to save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImage`] when no image (or no pixels) is loaded.
    pub fn export_scene<'a, I>(&self, pixels: Option<&'a I>) -> Result<Scene<'a, I>, Error> {
        let scene = self.scene(pixels);
        if scene.source.is_none() {
            tracing::warn!("export requested with no image loaded");
            return Err(Error::NoImage);
        }
        Ok(scene)
    }

    // --- Internal helpers ---

    fn min_size(&self) -> f64 {
        self.config.handle_size
    }

    fn start_pinch(&mut self, a: Point, b: Point) {
        if self.image.is_none() {
            return;
        }
        self.input = InputState::Pinching {
            start_distance: a.distance(b),
            start_mid: a.midpoint(b),
            orig: self.transform,
        };
        tracing::debug!(distance = a.distance(b), "pinch started");
    }

    fn end_gesture(&mut self, reason: &'static str) {
        if !self.input.is_idle() {
            tracing::debug!(reason, state = ?self.input, "gesture ended");
        }
        self.input = InputState::Idle;
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Vec<Action> {
        if cursor == self.cursor {
            return Vec::new();
        }
        self.cursor = cursor;
        vec![Action::SetCursor(cursor)]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, sizing the element to the configured frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if the configured canvas is too small.
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Result<Self, Error> {
        let core = EngineCore::new(config)?;
        canvas.set_width(core.frame().width());
        canvas.set_height(core.frame().height());
        Ok(Self { canvas, image: None, core })
    }

    // --- Image ---

    /// Adopt an image element whose `onload` has fired.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the element has no natural size; the
    /// previous image is cleared in that case.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Result<Vec<Action>, Error> {
        match ImageInfo::new(image.natural_width(), image.natural_height()) {
            Ok(info) => {
                self.image = Some(image);
                Ok(self.core.set_image(info))
            }
            Err(e) => {
                tracing::warn!(error = %e, "image element has no natural size");
                self.clear_image();
                Err(e)
            }
        }
    }

    pub fn clear_image(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.clear_image()
    }

    // --- Frame ---

    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if either dimension is below the minimum.
    pub fn set_frame(&mut self, width: u32, height: u32) -> Result<Vec<Action>, Error> {
        let actions = self.core.set_frame(width, height)?;
        self.sync_canvas_size();
        Ok(actions)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidPreset`] for a malformed or undersized preset.
    pub fn apply_preset(&mut self, preset: &str) -> Result<Vec<Action>, Error> {
        let actions = self.core.apply_preset(preset)?;
        self.sync_canvas_size();
        Ok(actions)
    }

    // --- Input events ---

    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<Action> {
        self.core.handle_event(event)
    }

    // --- Render ---

    /// Draw the current state, handles included, to the on-screen canvas.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if the 2D context is unavailable or a draw call throws.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = context_2d(&self.canvas)?;
        let mut surface = CanvasSurface::new(&ctx);
        render::draw(&mut surface, &self.core.scene(self.image.as_ref()), Overlay::Handles)
    }

    // --- Export ---

    /// Render without handles onto an off-screen canvas and return a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImage`] before any image is loaded,
    /// [`Error::TaintedSource`] if the browser refuses to read back a
    /// cross-origin image, and [`Error::Export`] for any other failure.
    pub fn export_data_url(&self) -> Result<String, Error> {
        let scene = self.core.export_scene(self.image.as_ref())?;
        let document = document()?;
        let offscreen = document
            .create_element("canvas")
            .map_err(export_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::Export("created element is not a canvas".to_owned()))?;
        offscreen.set_width(self.core.frame().width());
        offscreen.set_height(self.core.frame().height());

        let ctx = context_2d(&offscreen).map_err(export_error)?;
        let mut surface = CanvasSurface::new(&ctx);
        render::draw(&mut surface, &scene, Overlay::None).map_err(export_error)?;
        let url = offscreen.to_data_url_with_type(EXPORT_MIME).map_err(export_error)?;
        tracing::info!(
            width = self.core.frame().width(),
            height = self.core.frame().height(),
            "composite exported"
        );
        Ok(url)
    }

    /// Export and hand the PNG to the browser as a download named `file_name`.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::export_data_url`].
    pub fn download(&self, file_name: &str) -> Result<(), Error> {
        let url = self.export_data_url()?;
        let anchor = document()?
            .create_element("a")
            .map_err(export_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| Error::Export("created element is not an anchor".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        Ok(())
    }

    fn sync_canvas_size(&self) {
        self.canvas.set_width(self.core.frame().width());
        self.canvas.set_height(self.core.frame().height());
    }
}

fn document() -> Result<Document, Error> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Export("no document available".to_owned()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Classify a thrown browser error; a `SecurityError` means the canvas is tainted.
fn export_error(value: JsValue) -> Error {
    let error = match value.dyn_ref::<DomException>() {
        Some(ex) if ex.name() == "SecurityError" => Error::TaintedSource,
        Some(ex) => Error::Export(ex.message()),
        None => match value.dyn_ref::<js_sys::Error>() {
            Some(err) => Error::Export(String::from(err.message())),
            None => Error::Export(value.as_string().unwrap_or_else(|| format!("{value:?}"))),
        },
    };
    tracing::warn!(error = %error, "export failed");
    error
}
