//! Reading a render target back into a [`CapturedFrame`].

use embedview_core::{CapturedFrame, ImageOrigin};

use crate::error::{RenderError, RenderResult};
use crate::render_target::RenderTarget;

/// Bytes per row of a texture copy, padded to wgpu's copy alignment.
pub fn aligned_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Copies padded rows into a tight buffer.
pub fn strip_row_padding(padded: &[u8], width: u32, height: u32, bytes_per_row: u32) -> Vec<u8> {
    let row_bytes = (width * 4) as usize;
    let mut result = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * bytes_per_row as usize;
        result.extend_from_slice(&padded[start..start + row_bytes]);
    }
    result
}

/// Reads the color texture of a [`RenderTarget`] back to the CPU.
///
/// Keeps its staging buffer between grabs and only reallocates when the
/// render target size changes.
#[derive(Default)]
pub struct FrameGrabber {
    staging: Option<(wgpu::Buffer, u32, u32)>,
}

impl FrameGrabber {
    pub fn new() -> Self {
        Self::default()
    }

    fn staging_buffer(&mut self, device: &wgpu::Device, width: u32, height: u32) -> &wgpu::Buffer {
        let stale = !matches!(self.staging, Some((_, w, h)) if w == width && h == height);
        if stale {
            self.staging = None;
        }
        let (buffer, _, _) = self.staging.get_or_insert_with(|| {
            let size = u64::from(aligned_bytes_per_row(width)) * u64::from(height);
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("frame readback buffer"),
                size,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                mapped_at_creation: false,
            });
            (buffer, width, height)
        });
        buffer
    }

    /// Captures the last render of `target`.
    pub fn grab(&mut self, target: &RenderTarget) -> RenderResult<CapturedFrame> {
        let gpu = target.gpu();
        let (width, height) = target.size();
        let bytes_per_row = aligned_bytes_per_row(width);
        let buffer = self.staging_buffer(&gpu.device, width, height);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame capture encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: target.color_texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and read data
        let buffer_slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        gpu.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|_| RenderError::Timeout)?;
        rx.recv()
            .map_err(|_| RenderError::BufferMapFailed)?
            .map_err(|_| RenderError::BufferMapFailed)?;

        let rgba = {
            let data = buffer_slice.get_mapped_range();
            strip_row_padding(&data, width, height, bytes_per_row)
        };
        buffer.unmap();

        // wgpu textures are addressed from the top-left corner
        let frame = CapturedFrame::from_rgba(width, height, ImageOrigin::TopLeft, &rgba, false)?;
        Ok(frame)
    }
}
