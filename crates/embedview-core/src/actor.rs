//! Drawable objects and their display properties.

use glam::Vec3;

use crate::mesh::{Bounds, PolyMesh};

/// How an actor's polygons are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    /// Filled, lit polygons.
    #[default]
    Surface,
    /// Polygon outlines only.
    Wireframe,
}

/// Display properties of an actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Base color (linear RGB, 0..1).
    pub color: Vec3,
    /// Ambient lighting coefficient.
    pub ambient: f32,
    /// Diffuse lighting coefficient.
    pub diffuse: f32,
    /// Specular lighting coefficient.
    pub specular: f32,
    /// Specular exponent.
    pub specular_power: f32,
    pub representation: Representation,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            ambient: 0.0,
            diffuse: 1.0,
            specular: 0.0,
            specular_power: 1.0,
            representation: Representation::Surface,
        }
    }
}

impl Property {
    /// Sets the base color, clamping each channel to 0..1.
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color.clamp(Vec3::ZERO, Vec3::ONE);
    }
}

/// A mesh placed in the scene with a display property.
#[derive(Debug, Clone)]
pub struct Actor {
    mesh: PolyMesh,
    property: Property,
    visible: bool,
}

impl Actor {
    pub fn new(mesh: PolyMesh) -> Self {
        Self {
            mesh,
            property: Property::default(),
            visible: true,
        }
    }

    /// Sets the surface color.
    #[must_use]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.property.set_color(color);
        self
    }

    pub fn mesh(&self) -> &PolyMesh {
        &self.mesh
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn property_mut(&mut self) -> &mut Property {
        &mut self.property
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.mesh.bounds()
    }
}
