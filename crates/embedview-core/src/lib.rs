//! Core abstractions for embedview.
//!
//! This crate holds everything about the embedded 3D view that does not touch the GPU:
//! - [`PolyMesh`] geometry and the [`CylinderSource`] that generates it
//! - [`Actor`]s with their display [`Property`], collected in a [`Scene`]
//! - the [`Camera`] and the [`TrackballCameraStyle`] interaction controller
//! - [`CapturedFrame`] snapshots and the window-side [`Rgb888Image`]
//! - fixed program [`Options`] and the shared error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel and index math converts between u32/usize/f32 throughout
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod actor;
pub mod camera;
pub mod cylinder;
pub mod error;
pub mod frame;
pub mod interactor;
pub mod mesh;
pub mod options;
pub mod scene;

pub use actor::{Actor, Property, Representation};
pub use camera::Camera;
pub use cylinder::CylinderSource;
pub use error::{EmbedviewError, Result};
pub use frame::{CapturedFrame, ImageOrigin, Rgb888Image};
pub use interactor::{
    InteractionResponse, InteractorEvent, Modifiers, PointerButton, TrackballCameraStyle,
};
pub use mesh::{Bounds, PolyMesh};
pub use options::Options;
pub use scene::Scene;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
