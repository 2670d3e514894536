//! Software surface: composites into an in-memory RGBA buffer.
//!
//! Used by the exporter and the CLI, and by tests that need to inspect
//! pixels. Blur is a true Gaussian with sigma equal to the blur radius,
//! which matches what the browser's `blur()` filter does. Images are only
//! resampled where they land on the canvas, so cost follows the frame size
//! rather than the zoom level.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::Error;
use crate::geom::{Point, Rect};
use crate::hit::Corner;
use crate::model::{Color, Frame};
use crate::render::{Surface, glyph_segment};

const HANDLE_FILL: Rgba<u8> = Rgba([0, 123, 255, 204]);
const HANDLE_STROKE: Rgba<u8> = Rgba([255, 255, 255, 230]);
const PLACEHOLDER_FILL: Rgba<u8> = Rgba([0x99, 0x99, 0x99, 0xff]);

/// Pixel multiplier for the 8x8 bitmap font (16 px glyphs).
const LABEL_SCALE: i64 = 2;

pub struct RasterSurface {
    canvas: RgbaImage,
}

impl RasterSurface {
    #[must_use]
    pub fn new(frame: Frame) -> Self {
        Self { canvas: RgbaImage::new(frame.width(), frame.height()) }
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    fn blend_at(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.canvas.width() || y >= self.canvas.height() {
            return;
        }
        let dst = *self.canvas.get_pixel(x, y);
        self.canvas.put_pixel(x, y, blend_pixel(dst, color));
    }

    fn draw_line(&mut self, a: Point, b: Point, color: Rgba<u8>) {
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0);
        let n = to_i64(steps);
        for i in 0..=n {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / steps;
            let x = a.x + (b.x - a.x) * t;
            let y = a.y + (b.y - a.y) * t;
            self.blend_at(to_i64(x.round()), to_i64(y.round()), color);
        }
    }
}

impl Surface for RasterSurface {
    type Image = RgbaImage;
    type Error = Error;

    fn clear(&mut self, _frame: Frame, fill: Color) -> Result<(), Error> {
        let fill = Rgba(fill.rgba());
        for px in self.canvas.pixels_mut() {
            *px = fill;
        }
        Ok(())
    }

    fn draw_placeholder(&mut self, frame: Frame, text: &str) -> Result<(), Error> {
        let glyph = 8 * LABEL_SCALE;
        let chars = i64::try_from(text.chars().count()).unwrap_or(i64::MAX / glyph);
        let x0 = (i64::from(frame.width()) - chars * glyph) / 2;
        let y0 = (i64::from(frame.height()) - glyph) / 2;
        for (i, ch) in (0_i64..).zip(text.chars()) {
            let Some(rows) = BASIC_FONTS.get(ch) else {
                continue;
            };
            for (row, bits) in (0_i64..).zip(rows) {
                for col in 0..8_i64 {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    for sy in 0..LABEL_SCALE {
                        for sx in 0..LABEL_SCALE {
                            let px = x0 + i * glyph + col * LABEL_SCALE + sx;
                            let py = y0 + row * LABEL_SCALE + sy;
                            self.blend_at(px, py, PLACEHOLDER_FILL);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect, blur_px: f64) -> Result<(), Error> {
        let width = to_dim(dest.width.round());
        let height = to_dim(dest.height.round());
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return Ok(());
        }
        let margin = blur_margin(blur_px);
        let origin = (to_i64(dest.x.round()), to_i64(dest.y.round()));
        let canvas = self.canvas.dimensions();
        let Some((scaled, (x, y))) = resample(image, origin, (width, height), canvas, margin) else {
            return Ok(());
        };
        if blur_px > 0.0 {
            let blurred = blur_padded(&scaled, blur_px, margin);
            imageops::overlay(&mut self.canvas, &blurred, x - margin, y - margin);
        } else {
            imageops::overlay(&mut self.canvas, &scaled, x, y);
        }
        Ok(())
    }

    fn draw_handle(&mut self, center: Point, size: f64, corner: Corner) -> Result<(), Error> {
        let half = size * 0.5;
        let x0 = to_i64((center.x - half).round());
        let y0 = to_i64((center.y - half).round());
        let side = to_i64(size.round()).max(1);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                let edge = x == x0 || y == y0 || x == x0 + side - 1 || y == y0 + side - 1;
                self.blend_at(x, y, if edge { HANDLE_STROKE } else { HANDLE_FILL });
            }
        }
        let (a, b) = glyph_segment(center, size, corner);
        self.draw_line(a, b, HANDLE_STROKE);
        Ok(())
    }
}

/// Scale `image` to `size` at `origin`, keeping only what lands on the
/// canvas grown by `margin` on every side. Returns the layer and its
/// canvas position, or `None` when nothing lands there.
fn resample(
    image: &RgbaImage,
    origin: (i64, i64),
    size: (u32, u32),
    canvas: (u32, u32),
    margin: i64,
) -> Option<(RgbaImage, (i64, i64))> {
    let (src_w, src_h) = image.dimensions();
    if size.0 > src_w && size.1 > src_h {
        let vx = visible(origin.0, size.0, canvas.0, margin)?;
        let vy = visible(origin.1, size.1, canvas.1, margin)?;
        let xs = taps(vx, origin.0, size.0, src_w);
        let ys = taps(vy, origin.1, size.1, src_h);
        return Some((upsample(image, &xs, &ys), (vx.0, vy.0)));
    }
    let sx = clip_axis(src_w, origin.0, size.0, canvas.0, margin)?;
    let sy = clip_axis(src_h, origin.1, size.1, canvas.1, margin)?;
    let crop = imageops::crop_imm(image, sx.crop_start, sy.crop_start, sx.crop_len, sy.crop_len).to_image();
    let scaled = if crop.dimensions() == (sx.len, sy.len) {
        crop
    } else {
        imageops::resize(&crop, sx.len, sy.len, FilterType::Triangle)
    };
    Some((scaled, (sx.start, sy.start)))
}

/// Canvas range `[lo, hi)` covered by `dest_len` pixels at `dest_pos`,
/// clipped to the canvas grown by `margin`.
fn visible(dest_pos: i64, dest_len: u32, canvas_len: u32, margin: i64) -> Option<(i64, i64)> {
    let lo = dest_pos.max(-margin);
    let hi = (dest_pos + i64::from(dest_len)).min(i64::from(canvas_len) + margin);
    (hi > lo).then_some((lo, hi))
}

/// One axis of a downscaled layer: which source pixels to resample and
/// where the resampled strip lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    crop_start: u32,
    crop_len: u32,
    start: i64,
    len: u32,
}

/// The crop is widened to whole source pixels, so the strip may overhang
/// the visible range by one scaled source pixel per side.
#[allow(clippy::cast_precision_loss)]
fn clip_axis(src_len: u32, dest_pos: i64, dest_len: u32, canvas_len: u32, margin: i64) -> Option<Span> {
    let (lo, hi) = visible(dest_pos, dest_len, canvas_len, margin)?;
    let per_src = f64::from(dest_len) / f64::from(src_len);
    let src_lo = ((lo - dest_pos) as f64 / per_src).floor().max(0.0);
    let src_hi = ((hi - dest_pos) as f64 / per_src).ceil().min(f64::from(src_len));
    let start = dest_pos + to_i64((src_lo * per_src).round());
    let end = dest_pos + to_i64((src_hi * per_src).round());
    Some(Span {
        crop_start: to_dim(src_lo),
        crop_len: to_dim(src_hi - src_lo).max(1),
        start,
        len: u32::try_from(end - start).unwrap_or(0).max(1),
    })
}

/// Neighbouring source pixels and the weight of the second one.
#[derive(Debug, Clone, Copy)]
struct Tap {
    i0: u32,
    i1: u32,
    t: f64,
}

/// Bilinear taps for each canvas pixel in `[lo, hi)`, sampling at pixel
/// centres the way the triangle filter does when enlarging.
#[allow(clippy::cast_precision_loss)]
fn taps((lo, hi): (i64, i64), dest_pos: i64, dest_len: u32, src_len: u32) -> Vec<Tap> {
    let per_src = f64::from(dest_len) / f64::from(src_len);
    let last = f64::from(src_len.saturating_sub(1));
    (lo..hi)
        .map(|p| {
            let u = (((p - dest_pos) as f64 + 0.5) / per_src - 0.5).clamp(0.0, last);
            let i0 = u.floor();
            Tap { i0: to_dim(i0), i1: to_dim((i0 + 1.0).min(last)), t: u - i0 }
        })
        .collect()
}

fn upsample(image: &RgbaImage, xs: &[Tap], ys: &[Tap]) -> RgbaImage {
    let width = u32::try_from(xs.len()).unwrap_or(u32::MAX);
    let height = u32::try_from(ys.len()).unwrap_or(u32::MAX);
    let mut out = RgbaImage::new(width, height);
    for (row, ty) in out.rows_mut().zip(ys) {
        for (px, tx) in row.zip(xs) {
            *px = bilerp(image, *tx, *ty);
        }
    }
    out
}

fn bilerp(image: &RgbaImage, x: Tap, y: Tap) -> Rgba<u8> {
    let tl = image.get_pixel(x.i0, y.i0);
    let tr = image.get_pixel(x.i1, y.i0);
    let bl = image.get_pixel(x.i0, y.i1);
    let br = image.get_pixel(x.i1, y.i1);
    let mut out = [0_u8; 4];
    for (k, ch) in out.iter_mut().enumerate() {
        let top = f64::from(tl[k]) * (1.0 - x.t) + f64::from(tr[k]) * x.t;
        let bottom = f64::from(bl[k]) * (1.0 - x.t) + f64::from(br[k]) * x.t;
        *ch = to_channel(top * (1.0 - y.t) + bottom * y.t);
    }
    Rgba(out)
}

/// Blur reaches about three sigmas.
fn blur_margin(blur_px: f64) -> i64 {
    if blur_px > 0.0 { to_i64((blur_px * 3.0).ceil()) } else { 0 }
}

/// Gaussian blur over a transparent border of `margin` pixels, so the
/// layer's own edges fade out instead of smearing their last row outward.
/// The result is `margin` larger on every side.
fn blur_padded(layer: &RgbaImage, blur_px: f64, margin: i64) -> RgbaImage {
    let pad = u32::try_from(margin).unwrap_or(0);
    let border = pad.saturating_mul(2);
    let mut padded = RgbaImage::new(layer.width().saturating_add(border), layer.height().saturating_add(border));
    imageops::replace(&mut padded, layer, i64::from(pad), i64::from(pad));
    premultiply(&mut padded);
    #[allow(clippy::cast_possible_truncation)]
    let sigma = blur_px as f32;
    let mut blurred = imageops::blur(&padded, sigma);
    unpremultiply(&mut blurred);
    blurred
}

// Blurring straight alpha would drag the transparent border's black into
// the colour channels.
fn premultiply(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = f64::from(px[3]) / 255.0;
        for ch in px.0.iter_mut().take(3) {
            *ch = to_channel(f64::from(*ch) * a);
        }
    }
}

fn unpremultiply(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        if px[3] == 0 {
            continue;
        }
        let a = f64::from(px[3]) / 255.0;
        for ch in px.0.iter_mut().take(3) {
            *ch = to_channel(f64::from(*ch) / a);
        }
    }
}

/// Source-over blend of `src` onto `dst`.
fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = f64::from(src[3]) / 255.0;
    if a <= 0.0 {
        return dst;
    }
    let inv = 1.0 - a;
    let mix = |d: u8, s: u8| to_channel(f64::from(d) * inv + f64::from(s) * a);
    Rgba([
        mix(dst[0], src[0]),
        mix(dst[1], src[1]),
        mix(dst[2], src[2]),
        to_channel(f64::from(dst[3]) * inv + f64::from(src[3])),
    ])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_dim(v: f64) -> u32 {
    v.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_possible_truncation)]
fn to_i64(v: f64) -> i64 {
    v as i64
}
