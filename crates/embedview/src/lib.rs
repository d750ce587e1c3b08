//! embedview: an interactive 3D view embedded in a desktop window.
//!
//! A scene is rendered offscreen on the GPU, read back into an RGB image and
//! drawn into a `winit` window on every paint. Pointer and keyboard input
//! drive a trackball camera.
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> embedview::Result<()> {
//!     // Writes test.tiff, then opens the interactive window
//!     embedview::run()
//! }
//! ```
//!
//! # Pieces
//!
//! - [`scene_setup`] builds the cylinder scene and performs the startup export
//! - [`RenderWidget`] implements the paint, resize and input callbacks
//! - [`EventAdapter`] translates `winit` input for the [`TrackballCameraStyle`]

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

mod app;
pub mod event_adapter;
pub mod scene_setup;
pub mod widget;

pub use embedview_core::{
    Actor, Camera, CapturedFrame, CylinderSource, EmbedviewError, ImageOrigin, Options, PolyMesh,
    Property, Representation, Result, Rgb888Image, Scene, TrackballCameraStyle, Vec2, Vec3,
};
pub use embedview_render::{save_frame, FrameGrabber, GpuContext, RenderTarget, WindowPainter};
pub use event_adapter::EventAdapter;
pub use widget::RenderWidget;

use winit::event_loop::EventLoop;

/// Runs the program with default [`Options`].
///
/// Initializes logging (`RUST_LOG` controls verbosity), then see [`run_with_options`].
pub fn run() -> Result<()> {
    let _ = env_logger::try_init();
    run_with_options(Options::default())
}

/// Renders the scene once, writes it to `options.export_path`, then shows it
/// in an interactive window until the window is closed.
pub fn run_with_options(options: Options) -> Result<()> {
    let widget = startup(&options)?;

    let event_loop = EventLoop::new().map_err(|e| EmbedviewError::WindowError(e.to_string()))?;
    let mut app = app::App::new(options, widget);
    event_loop
        .run_app(&mut app)
        .map_err(|e| EmbedviewError::WindowError(e.to_string()))?;

    match app.finish() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Builds the render target, exports the first frame and wraps both in a widget.
pub fn startup(options: &Options) -> Result<RenderWidget> {
    let mut target = scene_setup::create_render_target(options)?;
    let mut grabber = FrameGrabber::new();
    scene_setup::export_frame(&mut target, &mut grabber, &options.export_path)?;

    let mut widget = RenderWidget::new(TrackballCameraStyle::new(options.motion_factor));
    widget.set_render_target(target);
    Ok(widget)
}
