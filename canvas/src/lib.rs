//! Single-image canvas compositor.
//!
//! The user loads one image, positions and scales it inside a fixed-size
//! frame, optionally fills the rest of the frame with a blurred cover copy of
//! the same image, and exports the composite as PNG. This crate owns the
//! whole editing model: the pointer/touch state machine, the gesture math,
//! the compositor, and export. It compiles natively (tests, the `backdrop`
//! CLI) and to WebAssembly, where the host JavaScript only forwards DOM
//! events to the engine and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Engine`] and the testable [`engine::EngineCore`] |
//! | [`input`] | Input events, cursors, and the gesture state machine |
//! | [`gesture`] | Drag, resize, and pinch math with edge snapping |
//! | [`hit`] | Handle and body hit-testing |
//! | [`align`] | Anchors, initial fit, fit-to-width/height |
//! | [`model`] | Frame, image info, transform, colour, background style |
//! | [`geom`] | Points and rectangles |
//! | [`render`] | Compositing order and the browser canvas surface |
//! | [`raster`] | Software surface over an RGBA buffer |
//! | [`export`] | PNG export and file naming |
//! | [`load`] | MIME checks and decoding |
//! | [`config`] | Editor configuration and size presets |
//! | [`error`] | Error type and codes |
//! | [`consts`] | Shared numeric constants |

pub mod align;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod geom;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod load;
pub mod model;
pub mod raster;
pub mod render;
