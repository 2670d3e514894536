//! Error type shared by loading, configuration, and export.
//!
//! Every variant is surfaced to the user at the boundary that produced it
//! (file input, export button, CLI). None of them are retried.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Stable machine-readable code for an error, suitable for host-side branching.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not an image file: {0}")]
    InvalidFileType(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("nothing to export: no image loaded")]
    NoImage,
    #[error("export blocked: the source image is cross-origin and its pixels cannot be read back")]
    TaintedSource,
    #[error("export failed: {0}")]
    Export(String),
    #[error("invalid size preset: {0}")]
    InvalidPreset(String),
    #[error("canvas must be at least {min}x{min}, got {width}x{height}")]
    InvalidFrame { width: u32, height: u32, min: u32 },
    #[error("invalid colour: {0}")]
    InvalidColor(String),
    #[error("invalid anchor: {0}")]
    InvalidAnchor(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ErrorCode for Error {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFileType(_) => "E_INVALID_FILE_TYPE",
            Self::Decode(_) => "E_DECODE",
            Self::NoImage => "E_NO_IMAGE",
            Self::TaintedSource => "E_TAINTED_SOURCE",
            Self::Export(_) => "E_EXPORT",
            Self::InvalidPreset(_) => "E_INVALID_PRESET",
            Self::InvalidFrame { .. } => "E_INVALID_FRAME",
            Self::InvalidColor(_) => "E_INVALID_COLOR",
            Self::InvalidAnchor(_) => "E_INVALID_ANCHOR",
            Self::Config(_) => "E_CONFIG",
        }
    }
}

impl Error {
    /// Message suitable for an alert shown to the person using the editor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidFileType(_) => "Please select a valid image file.".to_owned(),
            Self::Decode(_) => "Failed to load image.".to_owned(),
            Self::NoImage => "Please upload an image first.".to_owned(),
            Self::TaintedSource => "Could not save the image due to security restrictions (cross-origin image). \
                                    Please upload from your device."
                .to_owned(),
            Self::Export(message) => format!("Could not save the image. Error: {message}"),
            other => other.to_string(),
        }
    }
}
