//! winit application driving the render widget.

use std::sync::Arc;

use embedview_core::{EmbedviewError, Options};
use embedview_render::WindowPainter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::widget::RenderWidget;

/// Owns the window and routes its events to the widget.
pub(crate) struct App {
    options: Options,
    widget: RenderWidget,
    window: Option<Arc<Window>>,
    error: Option<EmbedviewError>,
}

impl App {
    pub(crate) fn new(options: Options, widget: RenderWidget) -> Self {
        Self {
            options,
            widget,
            window: None,
            error: None,
        }
    }

    /// Consumes the app, returning the first fatal error seen while running.
    pub(crate) fn finish(self) -> Option<EmbedviewError> {
        self.error
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EmbedviewError) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, EmbedviewError> {
        let (width, height) = self.options.initial_size;
        let attributes = Window::default_attributes()
            .with_title(self.options.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(self.options.resizable);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| EmbedviewError::WindowError(e.to_string()))?,
        );

        if let Some(target) = self.widget.render_target() {
            let painter = WindowPainter::new(target.gpu(), window.clone())
                .map_err(|e| EmbedviewError::WindowError(e.to_string()))?;
            self.widget.attach_painter(painter);
        } else {
            log::warn!("No render target attached; the window stays empty");
        }

        let size = window.inner_size();
        log::info!(
            "Opened window \"{}\" ({}x{} physical pixels)",
            self.options.window_title,
            size.width,
            size.height
        );
        Ok(window)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.open_window(event_loop) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.widget.resize_event(size.width, size.height);
                // The windowing system repaints after a resize.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                self.widget.paint_event();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.widget.pointer_moved(position);
            }
            WindowEvent::CursorEntered { .. } => {
                self.widget.pointer_entered();
            }
            WindowEvent::CursorLeft { .. } => {
                self.widget.pointer_left();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.widget.pointer_button(state, button);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.widget.wheel(delta);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.widget.modifiers_changed(modifiers.state());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.widget.key_pressed(&event.logical_key);
                }
            }
            _ => {}
        }

        if self.widget.exit_requested() {
            log::info!("Exit requested from keyboard");
            event_loop.exit();
        }
    }
}
