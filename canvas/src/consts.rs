//! Shared numeric constants for the canvas crate.

// ── Frame ───────────────────────────────────────────────────────

/// Smallest allowed canvas width or height, in pixels.
pub const MIN_FRAME_DIM: u32 = 50;

/// Canvas width used when no configuration is supplied.
pub const DEFAULT_FRAME_WIDTH: u32 = 800;

/// Canvas height used when no configuration is supplied.
pub const DEFAULT_FRAME_HEIGHT: u32 = 600;

// ── Handles and hit-testing ─────────────────────────────────────

/// Side length of a drawn resize handle. Also the floor for drawn width/height.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Hit box side for a handle under mouse or pen input, as a multiple of the handle size.
pub const MOUSE_HANDLE_TOLERANCE: f64 = 2.0;

/// Hit box side for a handle under touch input, as a multiple of the handle size.
pub const TOUCH_HANDLE_TOLERANCE: f64 = 3.0;

/// Distance within which a dragged edge locks onto a frame boundary.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

// ── Sizing ──────────────────────────────────────────────────────

/// Fraction of the constraining frame dimension the image occupies on first load.
pub const INSCRIBE_MARGIN: f64 = 0.9;

/// Lower bound of the foreground scale slider (and pinch zoom).
pub const SCALE_MIN: f64 = 0.05;

/// Upper bound of the foreground scale slider (and pinch zoom).
pub const SCALE_MAX: f64 = 5.0;

// ── Text ────────────────────────────────────────────────────────

/// Label drawn in the middle of an empty canvas.
pub const PLACEHOLDER_TEXT: &str = "Upload an image";

/// Stem of exported file names.
pub const EXPORT_BASE_NAME: &str = "canvas-image";
