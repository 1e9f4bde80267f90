//! Error types for scopeshot.

use thiserror::Error;

/// The main error type for capture operations.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The render engine failed to draw or read back a buffer.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding or writing the image file failed.
    #[error("screenshot error: {0}")]
    Screenshot(String),

    /// The viewport has a zero-sized dimension.
    #[error("invalid capture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;
