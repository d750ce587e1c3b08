//! The set of actors drawn into a render target, plus the camera viewing them.

use glam::Vec3;

use crate::actor::{Actor, Representation};
use crate::camera::Camera;
use crate::mesh::Bounds;

/// Actors, camera and background color of a render target.
#[derive(Debug, Clone)]
pub struct Scene {
    actors: Vec<Actor>,
    camera: Camera,
    background: Vec3,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Scene {
    /// Creates an empty scene with the given background color.
    pub fn new(background: Vec3) -> Self {
        Self {
            actors: Vec::new(),
            camera: Camera::new(),
            background,
        }
    }

    /// Adds an actor and returns its index.
    pub fn add_actor(&mut self, actor: Actor) -> usize {
        self.actors.push(actor);
        self.actors.len() - 1
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    /// Iterates over the actors that should be drawn.
    pub fn visible_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_visible())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn background(&self) -> Vec3 {
        self.background
    }

    pub fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }

    /// Bounds of all visible actors, or `None` when nothing is visible.
    pub fn visible_bounds(&self) -> Option<Bounds> {
        self.visible_actors()
            .filter_map(Actor::bounds)
            .reduce(Bounds::union)
    }

    /// Points the camera at the visible actors. Does nothing for an empty scene.
    pub fn reset_camera(&mut self, aspect_ratio: f32) {
        if let Some(bounds) = self.visible_bounds() {
            self.camera.reset(bounds, aspect_ratio);
        } else {
            log::debug!("reset camera skipped: no visible actors");
        }
    }

    /// Refits the clipping range after the camera moved.
    pub fn reset_camera_clipping_range(&mut self) {
        if let Some(bounds) = self.visible_bounds() {
            self.camera.reset_clipping_range(bounds);
        }
    }

    /// Switches every actor to the given representation.
    pub fn set_representation(&mut self, representation: Representation) {
        for actor in &mut self.actors {
            actor.property_mut().representation = representation;
        }
    }
}
