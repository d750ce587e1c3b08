//! Construction of the fixed demo scene and the startup export.

use std::path::Path;

use embedview_core::{Actor, CapturedFrame, CylinderSource, EmbedviewError, Options, Result, Scene};
use embedview_render::{save_frame, FrameGrabber, GpuContext, RenderTarget};

/// Builds the demo scene: one capped cylinder with a solid surface color,
/// camera reset to frame it.
pub fn build_scene(options: &Options) -> Scene {
    let mesh = CylinderSource::new()
        .with_resolution(options.cylinder_resolution)
        .build();

    let mut scene = Scene::new(options.background_color);
    scene.add_actor(Actor::new(mesh).with_color(options.surface_color));

    let (width, height) = options.initial_size;
    scene.reset_camera(aspect_ratio(width, height));
    scene
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Creates a headless GPU context and a render target of the initial size
/// holding the demo scene.
pub fn create_render_target(options: &Options) -> Result<RenderTarget> {
    let gpu = GpuContext::new_headless_blocking()
        .map_err(|e| EmbedviewError::RenderError(e.to_string()))?;
    let (width, height) = options.initial_size;
    Ok(RenderTarget::new(gpu, width, height, build_scene(options)))
}

/// Renders `target` once, captures it and writes the frame to `path`.
///
/// The file is overwritten if it exists. Returns the captured frame.
pub fn export_frame(
    target: &mut RenderTarget,
    grabber: &mut FrameGrabber,
    path: impl AsRef<Path>,
) -> Result<CapturedFrame> {
    let path = path.as_ref();
    target.render();
    let frame = grabber
        .grab(target)
        .map_err(|e| EmbedviewError::RenderError(e.to_string()))?;
    save_frame(path, &frame).map_err(|e| EmbedviewError::ExportError(e.to_string()))?;
    log::info!(
        "Exported {}x{} frame to {}",
        frame.width(),
        frame.height(),
        path.display()
    );
    Ok(frame)
}
