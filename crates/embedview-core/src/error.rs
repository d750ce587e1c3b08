//! Error types for embedview.

use thiserror::Error;

/// The main error type for embedview operations.
#[derive(Error, Debug)]
pub enum EmbedviewError {
    /// Pixel data does not match the declared image dimensions.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Image dimensions must be non-zero.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// Failed to write an exported frame.
    #[error("export error: {0}")]
    ExportError(String),

    /// Window or event loop error.
    #[error("window error: {0}")]
    WindowError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for embedview operations.
pub type Result<T> = std::result::Result<T, EmbedviewError>;
