//! Fixed program options.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Constants the demo program is built from.
///
/// The program takes no flags or configuration files; every value here comes from
/// [`Options::default`]. The struct exists so scene setup, the widget and tests
/// agree on one set of numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Title of the window.
    pub window_title: String,

    /// Initial window and render target size in pixels.
    pub initial_size: (u32, u32),

    /// Whether the window can be resized.
    pub resizable: bool,

    /// File written with the startup capture.
    pub export_path: String,

    /// Background color of the render target.
    pub background_color: Vec3,

    /// Surface color of the cylinder actor.
    pub surface_color: Vec3,

    /// Number of facets around the cylinder.
    pub cylinder_resolution: u32,

    /// Scale applied to pointer motion by the trackball controller.
    pub motion_factor: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_title: "Test Window".to_string(),
            initial_size: (300, 300),
            resizable: true,
            export_path: "test.tiff".to_string(),
            background_color: Vec3::ZERO,
            surface_color: Vec3::new(1.0, 0.0, 0.0),
            cylinder_resolution: 20,
            motion_factor: 10.0,
        }
    }
}
