//! Pointer/keyboard interaction with the camera.
//!
//! Window events are translated into [`InteractorEvent`]s (positions in pixels,
//! origin at the bottom-left corner of the viewport) and handed to a
//! [`TrackballCameraStyle`], which manipulates the scene's camera.

use glam::{Vec2, Vec3};

use crate::actor::Representation;
use crate::scene::Scene;

/// Pointer buttons the controller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
}

/// An input event in the controller's coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractorEvent {
    ButtonPress {
        button: PointerButton,
        position: Vec2,
        modifiers: Modifiers,
    },
    ButtonRelease {
        button: PointerButton,
        position: Vec2,
    },
    MouseMove {
        position: Vec2,
    },
    /// One wheel notch; `forward` is away from the user.
    Wheel {
        forward: bool,
    },
    Enter,
    Leave,
    KeyPress {
        key: char,
    },
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponse {
    /// Nothing changed.
    Ignored,
    /// The camera moved.
    CameraChanged,
    /// Actor properties changed.
    SceneChanged,
    /// The user asked to close the view.
    ExitRequested,
}

impl InteractionResponse {
    /// Whether the next paint will show something different.
    pub fn needs_render(self) -> bool {
        matches!(self, Self::CameraChanged | Self::SceneChanged)
    }
}

/// Current drag operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Rotate,
    Pan,
    Spin,
    Dolly,
}

/// Trackball-camera controller.
///
/// | input | action |
/// |---|---|
/// | left drag | rotate around the focal point |
/// | shift + left drag, middle drag | pan |
/// | ctrl + left drag | spin around the view direction |
/// | ctrl + shift + left drag, right drag | dolly |
/// | wheel | dolly |
/// | `r` | reset camera |
/// | `w` / `s` | wireframe / surface |
/// | `q` / `e` | exit |
#[derive(Debug, Clone)]
pub struct TrackballCameraStyle {
    state: InteractionState,
    button: Option<PointerButton>,
    last_position: Vec2,
    motion_factor: f32,
    pointer_inside: bool,
}

impl Default for TrackballCameraStyle {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl TrackballCameraStyle {
    pub fn new(motion_factor: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            button: None,
            last_position: Vec2::ZERO,
            motion_factor,
            pointer_inside: false,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Handles one event for a viewport of `viewport` pixels.
    pub fn handle_event(
        &mut self,
        event: InteractorEvent,
        scene: &mut Scene,
        viewport: (u32, u32),
    ) -> InteractionResponse {
        let viewport = (viewport.0.max(1), viewport.1.max(1));
        match event {
            InteractorEvent::ButtonPress {
                button,
                position,
                modifiers,
            } => {
                self.last_position = position;
                if self.state != InteractionState::Idle {
                    return InteractionResponse::Ignored;
                }
                self.state = match (button, modifiers.shift, modifiers.control) {
                    (PointerButton::Left, true, true) | (PointerButton::Right, _, _) => {
                        InteractionState::Dolly
                    }
                    (PointerButton::Left, true, false) | (PointerButton::Middle, _, _) => {
                        InteractionState::Pan
                    }
                    (PointerButton::Left, false, true) => InteractionState::Spin,
                    (PointerButton::Left, false, false) => InteractionState::Rotate,
                };
                self.button = Some(button);
                log::trace!("interaction start: {:?}", self.state);
                InteractionResponse::Ignored
            }
            InteractorEvent::ButtonRelease { button, position } => {
                self.last_position = position;
                if self.button == Some(button) {
                    self.state = InteractionState::Idle;
                    self.button = None;
                }
                InteractionResponse::Ignored
            }
            InteractorEvent::MouseMove { position } => {
                let delta = position - self.last_position;
                let previous = self.last_position;
                self.last_position = position;
                let changed = match self.state {
                    InteractionState::Idle => false,
                    InteractionState::Rotate => self.rotate(scene, delta, viewport),
                    InteractionState::Pan => Self::pan(scene, delta, viewport),
                    InteractionState::Spin => Self::spin(scene, previous, position, viewport),
                    InteractionState::Dolly => self.dolly_drag(scene, delta, viewport),
                };
                if changed {
                    scene.reset_camera_clipping_range();
                    InteractionResponse::CameraChanged
                } else {
                    InteractionResponse::Ignored
                }
            }
            InteractorEvent::Wheel { forward } => {
                let steps = if forward { 1.0 } else { -1.0 };
                let factor = 1.1_f32.powf(0.2 * self.motion_factor * steps);
                scene.camera_mut().dolly(factor);
                scene.reset_camera_clipping_range();
                InteractionResponse::CameraChanged
            }
            InteractorEvent::Enter => {
                self.pointer_inside = true;
                InteractionResponse::Ignored
            }
            InteractorEvent::Leave => {
                self.pointer_inside = false;
                InteractionResponse::Ignored
            }
            InteractorEvent::KeyPress { key } => Self::key_press(key, scene, viewport),
        }
    }

    fn rotate(&self, scene: &mut Scene, delta: Vec2, viewport: (u32, u32)) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        let delta_azimuth = -20.0 / viewport.0 as f32;
        let delta_elevation = -20.0 / viewport.1 as f32;
        let camera = scene.camera_mut();
        camera.azimuth(delta.x * delta_azimuth * self.motion_factor);
        camera.elevation(delta.y * delta_elevation * self.motion_factor);
        camera.orthogonalize_view_up();
        true
    }

    fn pan(scene: &mut Scene, delta: Vec2, viewport: (u32, u32)) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        let camera = scene.camera_mut();
        let scale = camera.world_per_pixel(viewport.1);
        let motion: Vec3 = (camera.right() * delta.x + camera.view_up * delta.y) * scale;
        // Dragging moves the scene with the pointer
        camera.translate(-motion);
        true
    }

    fn spin(scene: &mut Scene, previous: Vec2, current: Vec2, viewport: (u32, u32)) -> bool {
        let center = Vec2::new(viewport.0 as f32, viewport.1 as f32) * 0.5;
        let old = previous - center;
        let new = current - center;
        if old == Vec2::ZERO || new == Vec2::ZERO {
            return false;
        }
        let angle = new.y.atan2(new.x).to_degrees() - old.y.atan2(old.x).to_degrees();
        if angle == 0.0 {
            return false;
        }
        scene.camera_mut().roll(angle);
        true
    }

    fn dolly_drag(&self, scene: &mut Scene, delta: Vec2, viewport: (u32, u32)) -> bool {
        if delta.y == 0.0 {
            return false;
        }
        let center_y = viewport.1 as f32 * 0.5;
        let dyf = self.motion_factor * delta.y / center_y;
        scene.camera_mut().dolly(1.1_f32.powf(dyf));
        true
    }

    fn key_press(key: char, scene: &mut Scene, viewport: (u32, u32)) -> InteractionResponse {
        match key.to_ascii_lowercase() {
            'r' => {
                scene.reset_camera(viewport.0 as f32 / viewport.1 as f32);
                InteractionResponse::CameraChanged
            }
            'w' => {
                scene.set_representation(Representation::Wireframe);
                InteractionResponse::SceneChanged
            }
            's' => {
                scene.set_representation(Representation::Surface);
                InteractionResponse::SceneChanged
            }
            'q' | 'e' => InteractionResponse::ExitRequested,
            _ => InteractionResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Actor, CylinderSource};
    use proptest::prelude::*;

    const VIEWPORT: (u32, u32) = (300, 300);

    fn cylinder_scene() -> Scene {
        let mut scene = Scene::default();
        scene.add_actor(Actor::new(CylinderSource::new().with_resolution(20).build()));
        scene.reset_camera(1.0);
        scene
    }

    fn press(
        style: &mut TrackballCameraStyle,
        scene: &mut Scene,
        button: PointerButton,
        modifiers: Modifiers,
    ) {
        style.handle_event(
            InteractorEvent::ButtonPress {
                button,
                position: Vec2::new(150.0, 150.0),
                modifiers,
            },
            scene,
            VIEWPORT,
        );
    }

    fn move_to(
        style: &mut TrackballCameraStyle,
        scene: &mut Scene,
        x: f32,
        y: f32,
    ) -> InteractionResponse {
        style.handle_event(
            InteractorEvent::MouseMove {
                position: Vec2::new(x, y),
            },
            scene,
            VIEWPORT,
        )
    }

    #[test]
    fn test_button_states() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let cases = [
            (PointerButton::Left, Modifiers::default(), InteractionState::Rotate),
            (PointerButton::Left, Modifiers { shift: true, control: false }, InteractionState::Pan),
            (
                PointerButton::Left,
                Modifiers { shift: false, control: true },
                InteractionState::Spin,
            ),
            (
                PointerButton::Left,
                Modifiers { shift: true, control: true },
                InteractionState::Dolly,
            ),
            (PointerButton::Middle, Modifiers::default(), InteractionState::Pan),
            (PointerButton::Right, Modifiers::default(), InteractionState::Dolly),
        ];
        for (button, modifiers, expected) in cases {
            press(&mut style, &mut scene, button, modifiers);
            assert_eq!(style.state(), expected, "{button:?} {modifiers:?}");
            style.handle_event(
                InteractorEvent::ButtonRelease {
                    button,
                    position: Vec2::ZERO,
                },
                &mut scene,
                VIEWPORT,
            );
            assert_eq!(style.state(), InteractionState::Idle);
        }
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let before = scene.camera().clone();
        assert_eq!(move_to(&mut style, &mut scene, 10.0, 20.0), InteractionResponse::Ignored);
        assert_eq!(scene.camera(), &before);
    }

    #[test]
    fn test_left_drag_rotates_camera() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let before = scene.camera().clone();

        press(&mut style, &mut scene, PointerButton::Left, Modifiers::default());
        let response = move_to(&mut style, &mut scene, 180.0, 160.0);

        assert_eq!(response, InteractionResponse::CameraChanged);
        let after = scene.camera();
        assert!((after.position - before.position).length() > 1e-3);
        assert_eq!(after.focal_point, before.focal_point);
        assert!((after.distance() - before.distance()).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_drag_through_pole_recovers() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let framed = scene.camera().distance();

        // 135 px in a 300 px viewport is exactly 90 degrees of elevation
        press(&mut style, &mut scene, PointerButton::Left, Modifiers::default());
        move_to(&mut style, &mut scene, 150.0, 15.0);
        let camera = scene.camera();
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-4);

        move_to(&mut style, &mut scene, 150.0, 5.0);
        let camera = scene.camera();
        assert!(camera.position.is_finite());
        assert!(camera.view_up.is_finite());
        assert!(camera.view_projection_matrix(1.0).is_finite());
        style.handle_event(
            InteractorEvent::ButtonRelease {
                button: PointerButton::Left,
                position: Vec2::new(150.0, 5.0),
            },
            &mut scene,
            VIEWPORT,
        );

        style.handle_event(InteractorEvent::KeyPress { key: 'r' }, &mut scene, VIEWPORT);
        let camera = scene.camera();
        assert!(camera.view_projection_matrix(1.0).is_finite());
        assert!((camera.distance() - framed).abs() < 1e-3);
    }

    #[test]
    fn test_downward_drag_through_pole_stays_finite() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        press(&mut style, &mut scene, PointerButton::Left, Modifiers::default());
        move_to(&mut style, &mut scene, 150.0, 285.0);
        move_to(&mut style, &mut scene, 150.0, 295.0);
        let camera = scene.camera();
        assert!(camera.position.is_finite());
        assert!(camera.view_up.is_finite());
    }

    #[test]
    fn test_release_stops_rotation() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        press(&mut style, &mut scene, PointerButton::Left, Modifiers::default());
        style.handle_event(
            InteractorEvent::ButtonRelease {
                button: PointerButton::Left,
                position: Vec2::new(150.0, 150.0),
            },
            &mut scene,
            VIEWPORT,
        );
        let before = scene.camera().clone();
        move_to(&mut style, &mut scene, 200.0, 200.0);
        assert_eq!(scene.camera(), &before);
    }

    #[test]
    fn test_pan_moves_focal_point() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let before = scene.camera().clone();
        press(&mut style, &mut scene, PointerButton::Middle, Modifiers::default());
        move_to(&mut style, &mut scene, 170.0, 150.0);
        let after = scene.camera();
        // Dragging right moves the camera left
        assert!(after.focal_point.x < before.focal_point.x);
        let offset_after = after.position - after.focal_point;
        let offset_before = before.position - before.focal_point;
        assert!((offset_after - offset_before).length() < 1e-4);
    }

    #[test]
    fn test_right_drag_up_dollies_in() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let before = scene.camera().distance();
        press(&mut style, &mut scene, PointerButton::Right, Modifiers::default());
        move_to(&mut style, &mut scene, 150.0, 180.0);
        assert!(scene.camera().distance() < before);
    }

    #[test]
    fn test_spin_rolls_view_up() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let before = scene.camera().view_up;
        style.handle_event(
            InteractorEvent::ButtonPress {
                button: PointerButton::Left,
                position: Vec2::new(250.0, 150.0),
                modifiers: Modifiers { shift: false, control: true },
            },
            &mut scene,
            VIEWPORT,
        );
        move_to(&mut style, &mut scene, 150.0, 250.0);
        assert!((scene.camera().view_up - before).length() > 0.1);
        assert!(scene.camera().view_up.dot(scene.camera().direction_of_projection()).abs() < 1e-4);
    }

    #[test]
    fn test_wheel_dolly() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let start = scene.camera().distance();
        let response =
            style.handle_event(InteractorEvent::Wheel { forward: true }, &mut scene, VIEWPORT);
        assert_eq!(response, InteractionResponse::CameraChanged);
        let closer = scene.camera().distance();
        assert!(closer < start);
        style.handle_event(InteractorEvent::Wheel { forward: false }, &mut scene, VIEWPORT);
        assert!((scene.camera().distance() - start).abs() < 1e-3);
    }

    #[test]
    fn test_enter_leave_tracks_pointer() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        assert!(!style.pointer_inside());
        assert_eq!(
            style.handle_event(InteractorEvent::Enter, &mut scene, VIEWPORT),
            InteractionResponse::Ignored
        );
        assert!(style.pointer_inside());
        style.handle_event(InteractorEvent::Leave, &mut scene, VIEWPORT);
        assert!(!style.pointer_inside());
    }

    #[test]
    fn test_key_bindings() {
        let mut style = TrackballCameraStyle::default();
        let mut scene = cylinder_scene();
        let framed = scene.camera().clone();

        scene.camera_mut().azimuth(40.0);
        let r = style.handle_event(InteractorEvent::KeyPress { key: 'r' }, &mut scene, VIEWPORT);
        assert_eq!(r, InteractionResponse::CameraChanged);
        assert!((scene.camera().distance() - framed.distance()).abs() < 1e-4);

        let w = style.handle_event(InteractorEvent::KeyPress { key: 'w' }, &mut scene, VIEWPORT);
        assert_eq!(w, InteractionResponse::SceneChanged);
        assert_eq!(scene.actors()[0].property().representation, Representation::Wireframe);

        style.handle_event(InteractorEvent::KeyPress { key: 'S' }, &mut scene, VIEWPORT);
        assert_eq!(scene.actors()[0].property().representation, Representation::Surface);

        let q = style.handle_event(InteractorEvent::KeyPress { key: 'q' }, &mut scene, VIEWPORT);
        assert_eq!(q, InteractionResponse::ExitRequested);
        assert!(!q.needs_render());

        let x = style.handle_event(InteractorEvent::KeyPress { key: 'x' }, &mut scene, VIEWPORT);
        assert_eq!(x, InteractionResponse::Ignored);
    }

    proptest! {
        #[test]
        fn prop_rotation_keeps_focal_distance(
            dx in -200.0f32..200.0,
            dy in -150.0f32..150.0,
            dy2 in -150.0f32..150.0,
        ) {
            let mut style = TrackballCameraStyle::default();
            let mut scene = cylinder_scene();
            let distance = scene.camera().distance();

            press(&mut style, &mut scene, PointerButton::Left, Modifiers::default());
            move_to(&mut style, &mut scene, 150.0 + dx, 150.0 + dy);
            move_to(&mut style, &mut scene, 150.0 + dx, 150.0 + dy + dy2);

            let camera = scene.camera();
            prop_assert!(camera.position.is_finite() && camera.view_up.is_finite());
            prop_assert!((camera.distance() - distance).abs() < 1e-3 * distance);
            prop_assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-3);
            prop_assert!((camera.view_up.length() - 1.0).abs() < 1e-4);
        }
    }
}
