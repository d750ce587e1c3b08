//! Translation of winit input into the interaction controller's event model.

use embedview_core::{InteractorEvent, Modifiers, PointerButton, Vec2};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, ModifiersState};

/// Converts window events into [`InteractorEvent`]s.
///
/// winit reports positions in physical pixels from the top-left corner; the
/// controller expects physical pixels from the bottom-left corner. The adapter
/// remembers the last cursor position and modifier state because winit reports
/// them separately from button events.
#[derive(Debug, Clone, Default)]
pub struct EventAdapter {
    cursor: Vec2,
    modifiers: ModifiersState,
}

impl EventAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position in controller coordinates.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.modifiers.shift_key(),
            control: self.modifiers.control_key(),
        }
    }

    /// Flips a top-left window position into bottom-left viewport coordinates.
    fn to_viewport(position: PhysicalPosition<f64>, viewport_height: u32) -> Vec2 {
        let height = f64::from(viewport_height.max(1));
        Vec2::new(position.x as f32, (height - 1.0 - position.y) as f32)
    }

    pub fn cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        viewport_height: u32,
    ) -> InteractorEvent {
        self.cursor = Self::to_viewport(position, viewport_height);
        InteractorEvent::MouseMove {
            position: self.cursor,
        }
    }

    /// Translates a button change; buttons the controller does not use yield `None`.
    pub fn mouse_input(&self, state: ElementState, button: MouseButton) -> Option<InteractorEvent> {
        let button = match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => return None,
        };
        Some(match state {
            ElementState::Pressed => InteractorEvent::ButtonPress {
                button,
                position: self.cursor,
                modifiers: self.modifiers(),
            },
            ElementState::Released => InteractorEvent::ButtonRelease {
                button,
                position: self.cursor,
            },
        })
    }

    /// Translates a wheel movement into one notch; horizontal or zero scrolls yield `None`.
    pub fn mouse_wheel(&self, delta: MouseScrollDelta) -> Option<InteractorEvent> {
        let vertical = match delta {
            MouseScrollDelta::LineDelta(_, y) => f64::from(y),
            MouseScrollDelta::PixelDelta(position) => position.y,
        };
        if vertical == 0.0 {
            return None;
        }
        Some(InteractorEvent::Wheel {
            forward: vertical > 0.0,
        })
    }

    /// Translates a printable key press; other keys yield `None`.
    pub fn key_pressed(&self, key: &Key) -> Option<InteractorEvent> {
        match key {
            Key::Character(text) => text
                .chars()
                .next()
                .map(|key| InteractorEvent::KeyPress { key }),
            _ => None,
        }
    }

    pub fn cursor_entered(&self) -> InteractorEvent {
        InteractorEvent::Enter
    }

    pub fn cursor_left(&self) -> InteractorEvent {
        InteractorEvent::Leave
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use winit::keyboard::NamedKey;

    #[test]
    fn test_cursor_is_flipped_to_bottom_left() {
        let mut adapter = EventAdapter::new();
        let event = adapter.cursor_moved(PhysicalPosition::new(10.0, 0.0), 300);
        assert_eq!(
            event,
            InteractorEvent::MouseMove {
                position: Vec2::new(10.0, 299.0)
            }
        );
        adapter.cursor_moved(PhysicalPosition::new(5.0, 299.0), 300);
        assert_eq!(adapter.cursor(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_button_uses_last_cursor_and_modifiers() {
        let mut adapter = EventAdapter::new();
        adapter.cursor_moved(PhysicalPosition::new(40.0, 60.0), 100);
        adapter.set_modifiers(ModifiersState::SHIFT);

        let press = adapter.mouse_input(ElementState::Pressed, MouseButton::Left);
        assert_eq!(
            press,
            Some(InteractorEvent::ButtonPress {
                button: PointerButton::Left,
                position: Vec2::new(40.0, 39.0),
                modifiers: Modifiers {
                    shift: true,
                    control: false
                },
            })
        );

        let release = adapter.mouse_input(ElementState::Released, MouseButton::Right);
        assert_eq!(
            release,
            Some(InteractorEvent::ButtonRelease {
                button: PointerButton::Right,
                position: Vec2::new(40.0, 39.0),
            })
        );
    }

    #[test]
    fn test_unused_buttons_are_dropped() {
        let adapter = EventAdapter::new();
        assert!(adapter
            .mouse_input(ElementState::Pressed, MouseButton::Back)
            .is_none());
        assert!(adapter
            .mouse_input(ElementState::Pressed, MouseButton::Other(7))
            .is_none());
    }

    #[test]
    fn test_wheel_direction() {
        let adapter = EventAdapter::new();
        assert_eq!(
            adapter.mouse_wheel(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(InteractorEvent::Wheel { forward: true })
        );
        assert_eq!(
            adapter.mouse_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0))),
            Some(InteractorEvent::Wheel { forward: false })
        );
        assert_eq!(adapter.mouse_wheel(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }

    #[test]
    fn test_keys() {
        let adapter = EventAdapter::new();
        assert_eq!(
            adapter.key_pressed(&Key::Character("r".into())),
            Some(InteractorEvent::KeyPress { key: 'r' })
        );
        assert_eq!(adapter.key_pressed(&Key::Named(NamedKey::Escape)), None);
    }

    proptest! {
        #[test]
        fn prop_flip_stays_in_viewport(height in 1u32..4096, row in 0u32..4096) {
            let row = row % height;
            let mut adapter = EventAdapter::new();
            adapter.cursor_moved(PhysicalPosition::new(0.0, f64::from(row)), height);
            let y = adapter.cursor().y;
            prop_assert!(y >= 0.0 && y <= (height - 1) as f32);
            prop_assert!((y + row as f32 - (height - 1) as f32).abs() < 1e-3);
        }
    }
}
