//! Captured frames and the window-side RGB888 image.
//!
//! A [`CapturedFrame`] is whatever the render target produced, tagged with the
//! corner its first row starts at. An [`Rgb888Image`] is what the window painter
//! consumes: tightly packed RGB rows, first row at the top.

use crate::error::{EmbedviewError, Result};

/// Bytes per pixel of both [`CapturedFrame`] and [`Rgb888Image`].
pub const BYTES_PER_PIXEL: usize = 3;

/// Which corner the first stored row of an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageOrigin {
    /// First row is the top of the picture.
    #[default]
    TopLeft,
    /// First row is the bottom of the picture (OpenGL-style readback).
    BottomLeft,
}

fn check_dimensions(width: u32, height: u32, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(EmbedviewError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if len != expected {
        return Err(EmbedviewError::SizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// An RGB snapshot of a render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    width: u32,
    height: u32,
    origin: ImageOrigin,
    data: Vec<u8>,
}

impl CapturedFrame {
    /// Wraps tightly packed RGB rows.
    pub fn new(width: u32, height: u32, origin: ImageOrigin, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            origin,
            data,
        })
    }

    /// Builds a frame from 4-byte pixels, dropping the fourth channel.
    ///
    /// Set `bgra` when the source stores blue first (common swapchain formats).
    pub fn from_rgba(
        width: u32,
        height: u32,
        origin: ImageOrigin,
        rgba: &[u8],
        bgra: bool,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(EmbedviewError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for px in rgba.chunks_exact(4) {
            if bgra {
                data.extend_from_slice(&[px[2], px[1], px[0]]);
            } else {
                data.extend_from_slice(&px[..3]);
            }
        }
        Self::new(width, height, origin, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The `index`-th stored row, in storage order.
    pub fn row(&self, index: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = index as usize * stride;
        &self.data[start..start + stride]
    }
}

/// Packed RGB888 image with a top-left origin, as drawn into the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgb888Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Rgb888Image {
    /// Wraps tightly packed top-down RGB rows.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Converts a captured frame, flipping rows when the frame starts at the bottom.
    pub fn from_frame(frame: &CapturedFrame) -> Self {
        let image = Self {
            width: frame.width,
            height: frame.height,
            data: frame.data.clone(),
        };
        match frame.origin {
            ImageOrigin::TopLeft => image,
            ImageOrigin::BottomLeft => image.mirrored(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of one row in bytes.
    pub fn bytes_per_line(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` counted from the top-left corner.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.bytes_per_line() + x as usize * BYTES_PER_PIXEL;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Returns a vertically mirrored copy.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let stride = self.bytes_per_line();
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(stride).rev() {
            data.extend_from_slice(row);
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Expands to RGBA8 with opaque alpha, for texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for px in self.data.chunks_exact(BYTES_PER_PIXEL) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        rgba
    }
}
