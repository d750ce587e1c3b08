//! Widget integration tests.
//!
//! These need a GPU adapter (real or software fallback). When none is
//! available they print a notice and return early.

use embedview::{startup, Options, RenderWidget, Rgb888Image};
use winit::dpi::PhysicalPosition;
use winit::event::MouseButton;
use winit::keyboard::Key;

fn export_options(name: &str) -> Options {
    let path = std::env::temp_dir().join(format!("embedview_{}_{name}.tiff", std::process::id()));
    Options {
        export_path: path.to_string_lossy().into_owned(),
        ..Options::default()
    }
}

fn lit_pixels(image: &Rgb888Image) -> usize {
    image.data().chunks_exact(3).filter(|p| p[0] > 0).count()
}

#[test]
fn widget_tests() {
    let options = export_options("widget");
    let mut widget: RenderWidget = match startup(&options) {
        Ok(widget) => widget,
        Err(e) => {
            eprintln!("Skipping widget tests: startup failed ({e})");
            return;
        }
    };

    // --- Startup export is written at the default size ---
    let (width, height) = image::image_dimensions(&options.export_path).expect("export missing");
    assert_eq!((width, height), (300, 300));
    let _ = std::fs::remove_file(&options.export_path);

    // --- Paint before any resize uses the default size ---
    let first = widget.paint_event().expect("no image");
    assert_eq!((first.width(), first.height()), (300, 300));
    assert_eq!(first.bytes_per_line(), 900);
    assert!(lit_pixels(&first) > 0);

    // --- Resize applies on the next paint ---
    widget.resize_event(240, 160);
    assert_eq!(widget.render_target().map(|t| t.size()), Some((300, 300)));
    let resized = widget.paint_event().expect("no image");
    assert_eq!((resized.width(), resized.height()), (240, 160));
    assert_eq!(resized.data().len(), 240 * 160 * 3);

    // --- Press and drag rotates the camera ---
    let before = widget.paint_event().expect("no image");
    widget.pointer_moved(PhysicalPosition::new(120.0, 80.0));
    widget.pointer_pressed(MouseButton::Left);
    widget.pointer_moved(PhysicalPosition::new(160.0, 60.0));
    widget.pointer_released(MouseButton::Left);
    assert!(widget.take_repaint_request());
    let after = widget.paint_event().expect("no image");
    assert_ne!(before, after);

    // --- Wireframe key changes the picture, surface key restores coverage ---
    widget.key_pressed(&Key::Character("w".into()));
    let wireframe = widget.paint_event().expect("no image");
    widget.key_pressed(&Key::Character("s".into()));
    let surface = widget.paint_event().expect("no image");
    assert!(lit_pixels(&wireframe) < lit_pixels(&surface));

    // --- Quit key sets the exit flag ---
    assert!(!widget.exit_requested());
    widget.key_pressed(&Key::Character("q".into()));
    assert!(widget.exit_requested());
}
