//! The embedded render widget: paint, resize and input callbacks.

use std::time::Instant;

use embedview_core::{InteractionResponse, InteractorEvent, Rgb888Image, TrackballCameraStyle};
use embedview_render::{FrameGrabber, RenderTarget, WindowPainter};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, ModifiersState};

use crate::event_adapter::EventAdapter;

/// A window region showing an offscreen render.
///
/// Every paint applies the last recorded window size to the render target,
/// renders, captures the result and draws it into the window. Input events
/// are translated and forwarded to the trackball controller.
///
/// Without a render target every callback is a no-op apart from repaint
/// requests. Without a painter the widget still renders and returns images,
/// which is how it runs in tests.
pub struct RenderWidget {
    render_target: Option<RenderTarget>,
    grabber: FrameGrabber,
    painter: Option<WindowPainter>,
    adapter: EventAdapter,
    style: TrackballCameraStyle,
    recorded_size: Option<(u32, u32)>,
    repaint_requested: bool,
    exit_requested: bool,
}

impl Default for RenderWidget {
    fn default() -> Self {
        Self::new(TrackballCameraStyle::default())
    }
}

impl RenderWidget {
    pub fn new(style: TrackballCameraStyle) -> Self {
        Self {
            render_target: None,
            grabber: FrameGrabber::new(),
            painter: None,
            adapter: EventAdapter::new(),
            style,
            recorded_size: None,
            repaint_requested: false,
            exit_requested: false,
        }
    }

    /// Attaches the render target drawn by this widget, replacing any previous one.
    pub fn set_render_target(&mut self, target: RenderTarget) {
        self.render_target = Some(target);
    }

    pub fn render_target(&self) -> Option<&RenderTarget> {
        self.render_target.as_ref()
    }

    pub fn render_target_mut(&mut self) -> Option<&mut RenderTarget> {
        self.render_target.as_mut()
    }

    /// Attaches the painter that puts images on screen.
    pub fn attach_painter(&mut self, painter: WindowPainter) {
        self.painter = Some(painter);
    }

    pub fn painter(&self) -> Option<&WindowPainter> {
        self.painter.as_ref()
    }

    /// Size recorded by the last resize, if any.
    pub fn recorded_size(&self) -> Option<(u32, u32)> {
        self.recorded_size
    }

    /// Returns and clears the pending repaint request.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Whether an input asked the application to quit.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Records the new window size. The render target picks it up on the next paint.
    pub fn resize_event(&mut self, width: u32, height: u32) {
        log::debug!("resize to {width}x{height}");
        self.recorded_size = Some((width, height));
    }

    /// Renders the scene and draws it into the window.
    ///
    /// Returns the image handed to the painter, or `None` when no render target
    /// is attached or the capture failed.
    pub fn paint_event(&mut self) -> Option<Rgb888Image> {
        self.repaint_requested = false;
        let target = self.render_target.as_mut()?;

        let start = Instant::now();
        if let Some((width, height)) = self.recorded_size {
            target.set_size(width, height);
        }

        target.render();
        log::debug!("paint: render done at {:?}", start.elapsed());

        let frame = match self.grabber.grab(target) {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("Failed to capture frame: {e}");
                return None;
            }
        };
        log::debug!("paint: capture done at {:?}", start.elapsed());

        let image = Rgb888Image::from_frame(&frame);
        log::debug!("paint: image conversion done at {:?}", start.elapsed());

        if let Some(painter) = &mut self.painter {
            if let Err(e) = painter.draw_image(target.gpu(), &image) {
                log::warn!("Skipped drawing frame: {e}");
            }
        }
        log::debug!(
            "paint: {}x{} frame drawn at {:?}",
            image.width(),
            image.height(),
            start.elapsed()
        );

        Some(image)
    }

    pub fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        let event = self.adapter.cursor_moved(position, self.viewport().1);
        self.forward(event);
        self.request_repaint();
    }

    pub fn pointer_pressed(&mut self, button: MouseButton) {
        self.pointer_button(ElementState::Pressed, button);
    }

    pub fn pointer_released(&mut self, button: MouseButton) {
        self.pointer_button(ElementState::Released, button);
    }

    pub fn pointer_button(&mut self, state: ElementState, button: MouseButton) {
        if let Some(event) = self.adapter.mouse_input(state, button) {
            self.forward(event);
        }
        self.request_repaint();
    }

    pub fn wheel(&mut self, delta: MouseScrollDelta) {
        if let Some(event) = self.adapter.mouse_wheel(delta) {
            self.forward(event);
        }
        self.request_repaint();
    }

    pub fn key_pressed(&mut self, key: &Key) {
        if let Some(event) = self.adapter.key_pressed(key) {
            self.forward(event);
        }
        self.request_repaint();
    }

    pub fn modifiers_changed(&mut self, modifiers: ModifiersState) {
        self.adapter.set_modifiers(modifiers);
    }

    pub fn pointer_entered(&mut self) {
        let event = self.adapter.cursor_entered();
        self.forward(event);
        self.request_repaint();
    }

    pub fn pointer_left(&mut self) {
        let event = self.adapter.cursor_left();
        self.forward(event);
        self.request_repaint();
    }

    /// Size the controller sees: the pending window size, else the target's.
    fn viewport(&self) -> (u32, u32) {
        self.recorded_size
            .or_else(|| self.render_target.as_ref().map(RenderTarget::size))
            .unwrap_or((1, 1))
    }

    fn forward(&mut self, event: InteractorEvent) {
        let viewport = self.viewport();
        let Some(target) = self.render_target.as_mut() else {
            return;
        };
        let start = Instant::now();
        let response = self.style.handle_event(event, target.scene_mut(), viewport);
        log::debug!("input {event:?} -> {response:?} in {:?}", start.elapsed());
        if response == InteractionResponse::ExitRequested {
            self.exit_requested = true;
        }
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
        if let Some(painter) = &self.painter {
            painter.request_repaint();
        }
    }
}
