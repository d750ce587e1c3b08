//! Rendering backend for embedview.
//!
//! This crate provides the wgpu side of the embedded view:
//! - [`GpuContext`]: instance, adapter, device and queue shared by everything below
//! - [`RenderTarget`]: offscreen color/depth targets that a
//!   [`Scene`](embedview_core::Scene) is drawn into
//! - [`FrameGrabber`]: reads the render target back into a
//!   [`CapturedFrame`](embedview_core::CapturedFrame)
//! - [`export`]: writes captured frames to TIFF/PNG/JPEG files
//! - [`WindowPainter`]: blits an [`Rgb888Image`](embedview_core::Rgb888Image) into a window surface

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod actor_render;
pub mod capture;
pub mod error;
pub mod export;
pub mod gpu;
pub mod painter;
pub mod pipeline;
pub mod render_target;

pub use actor_render::{ActorRenderData, ActorUniforms, CameraUniforms, Vertex};
pub use capture::FrameGrabber;
pub use error::{RenderError, RenderResult};
pub use export::{save_frame, ExportError};
pub use gpu::GpuContext;
pub use painter::WindowPainter;
pub use render_target::RenderTarget;
