//! Writing captured frames to image files.

use std::path::Path;

use embedview_core::{CapturedFrame, Rgb888Image};
use image::{ImageBuffer, Rgb};

/// Saves a captured frame, choosing the encoder from the file extension.
///
/// Supported extensions: `tif`, `tiff`, `png`, `jpg`, `jpeg`. The frame is
/// written top row first whatever its capture origin. Existing files are
/// overwritten.
///
/// # Errors
/// Returns an error if the file cannot be written or format is unsupported.
pub fn save_frame(path: impl AsRef<Path>, frame: &CapturedFrame) -> Result<(), ExportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let format = match extension.as_str() {
        "tif" | "tiff" => image::ImageFormat::Tiff,
        "png" => image::ImageFormat::Png,
        "jpg" | "jpeg" => image::ImageFormat::Jpeg,
        _ => return Err(ExportError::UnsupportedFormat(extension)),
    };

    let upright = Rgb888Image::from_frame(frame);
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(upright.width(), upright.height(), upright.data().to_vec())
            .ok_or(ExportError::InvalidImageData)?;
    img.save_with_format(path, format)?;

    log::info!(
        "wrote {}x{} frame to {}",
        frame.width(),
        frame.height(),
        path.display()
    );
    Ok(())
}

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Invalid image data")]
    InvalidImageData,
}
