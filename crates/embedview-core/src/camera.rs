//! Camera and view management.

use glam::{Mat4, Quat, Vec3};

use crate::mesh::Bounds;

/// A perspective camera described by position, focal point and view-up.
///
/// Angles passed to the manipulation methods are in degrees; every method
/// rotates around the focal point, which stays fixed unless panned.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub focal_point: Vec3,
    /// Up vector (kept orthogonal to the view direction).
    pub view_up: Vec3,
    /// Vertical field of view in degrees.
    pub view_angle: f32,
    /// Near and far clipping distances along the view direction.
    pub clipping_range: (f32, f32),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            focal_point: Vec3::ZERO,
            view_up: Vec3::Y,
            view_angle: 30.0,
            clipping_range: (0.01, 1000.01),
        }
    }
}

impl Camera {
    /// Creates a camera at +Z looking at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance from the position to the focal point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.focal_point)
    }

    /// Unit vector from the position towards the focal point.
    #[must_use]
    pub fn direction_of_projection(&self) -> Vec3 {
        (self.focal_point - self.position).normalize()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.direction_of_projection().cross(self.view_up).normalize()
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    /// Returns the projection matrix for the given viewport aspect ratio (width / height).
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let (near, far) = self.clipping_range;
        Mat4::perspective_rh(self.view_angle.to_radians(), aspect_ratio, near, far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Rotates the position about the view-up vector centered at the focal point.
    pub fn azimuth(&mut self, degrees: f32) {
        let rotation = Quat::from_axis_angle(self.view_up.normalize(), degrees.to_radians());
        self.position = self.focal_point + rotation * (self.position - self.focal_point);
    }

    /// Rotates the position about the camera's left axis centered at the focal point.
    ///
    /// The view-up vector turns with the position, so passing over a pole never
    /// leaves it parallel to the view direction.
    pub fn elevation(&mut self, degrees: f32) {
        self.orthogonalize_view_up();
        let axis = -self.right();
        let rotation = Quat::from_axis_angle(axis, degrees.to_radians());
        self.position = self.focal_point + rotation * (self.position - self.focal_point);
        self.view_up = (rotation * self.view_up).normalize();
    }

    /// Rotates the view-up vector about the direction of projection.
    pub fn roll(&mut self, degrees: f32) {
        let rotation =
            Quat::from_axis_angle(self.direction_of_projection(), -degrees.to_radians());
        self.view_up = (rotation * self.view_up).normalize();
    }

    /// Moves the position towards the focal point; `factor > 1` moves closer.
    pub fn dolly(&mut self, factor: f32) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let distance = self.distance() / factor;
        self.position = self.focal_point - self.direction_of_projection() * distance;
    }

    /// Translates both the position and the focal point.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.focal_point += offset;
    }

    /// Makes the view-up vector perpendicular to the direction of projection.
    ///
    /// A view-up that is non-finite or parallel to the view direction is replaced
    /// by an arbitrary perpendicular unit vector.
    pub fn orthogonalize_view_up(&mut self) {
        let forward = self.direction_of_projection();
        if !forward.is_finite() {
            return;
        }
        let right = forward.cross(self.view_up);
        if !right.is_finite() || right.length_squared() < 1e-12 {
            log::warn!("degenerate view up {:?}, picking a new one", self.view_up);
            self.view_up = forward.any_orthonormal_vector();
            return;
        }
        self.view_up = right.cross(forward).normalize();
    }

    /// Frames the given bounds: focal point at the center, camera backed off along the
    /// current view plane normal so the bounding sphere fits the view angle.
    pub fn reset(&mut self, bounds: Bounds, aspect_ratio: f32) {
        let center = bounds.center();
        let mut radius = bounds.radius();
        if radius <= f32::EPSILON {
            radius = 0.5;
        }

        let mut angle = self.view_angle.to_radians();
        if aspect_ratio < 1.0 {
            // Tall viewport: the horizontal angle is the tighter one
            angle = 2.0 * ((angle * 0.5).tan() * aspect_ratio).atan();
        }
        let distance = radius / (angle * 0.5).sin();

        let mut normal = -self.direction_of_projection();
        if !normal.is_finite() || !self.focal_point.is_finite() {
            normal = Vec3::Z;
        }
        if !self.view_up.is_finite() || self.view_up.cross(normal).length_squared() < 1e-6 {
            log::warn!("view up parallel to view plane normal, resetting view up");
            self.view_up = -normal.any_orthonormal_vector();
        }

        self.focal_point = center;
        self.position = center + normal * distance;
        self.orthogonalize_view_up();
        self.reset_clipping_range(bounds);
    }

    /// Fits the near/far planes around the given bounds.
    pub fn reset_clipping_range(&mut self, bounds: Bounds) {
        let forward = self.direction_of_projection();
        let (mut min_depth, mut max_depth) = (f32::MAX, f32::MIN);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { bounds.min.x } else { bounds.max.x },
                if i & 2 == 0 { bounds.min.y } else { bounds.max.y },
                if i & 4 == 0 { bounds.min.z } else { bounds.max.z },
            );
            let depth = (corner - self.position).dot(forward);
            min_depth = min_depth.min(depth);
            max_depth = max_depth.max(depth);
        }

        let far = (max_depth * 1.01).max(1e-3);
        let near = (min_depth * 0.99).max(far * 0.001);
        self.clipping_range = (near, far);
    }

    /// World-space length of one pixel at the focal point for a viewport of the given height.
    #[must_use]
    pub fn world_per_pixel(&self, viewport_height: u32) -> f32 {
        let visible_height = 2.0 * self.distance() * (self.view_angle.to_radians() * 0.5).tan();
        visible_height / viewport_height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Bounds {
        Bounds {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        }
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::Z);
        assert_eq!(camera.focal_point, Vec3::ZERO);
        assert_eq!(camera.view_up, Vec3::Y);
        assert_eq!(camera.view_angle, 30.0);
    }

    #[test]
    fn test_reset_frames_bounds() {
        let mut camera = Camera::new();
        let bounds = Bounds {
            min: Vec3::new(1.0, 1.0, 1.0),
            max: Vec3::new(3.0, 3.0, 3.0),
        };
        camera.reset(bounds, 1.0);

        assert_eq!(camera.focal_point, Vec3::splat(2.0));
        let expected = bounds.radius() / 15.0_f32.to_radians().sin();
        assert!((camera.distance() - expected).abs() < 1e-4);
        // View direction is preserved (still looking down -Z)
        assert!((camera.direction_of_projection() - Vec3::NEG_Z).length() < 1e-5);

        // The box extends one unit in front of and behind the focal point
        let (near, far) = camera.clipping_range;
        assert!(near > 0.0 && near < far);
        assert!(near <= camera.distance() - 1.0 + 1e-3);
        assert!(far >= camera.distance() + 1.0 - 1e-3);
    }

    #[test]
    fn test_reset_tall_viewport_backs_off_further() {
        let mut wide = Camera::new();
        wide.reset(unit_box(), 1.0);
        let mut tall = Camera::new();
        tall.reset(unit_box(), 0.5);
        assert!(tall.distance() > wide.distance());
    }

    #[test]
    fn test_azimuth_orbits_around_focal_point() {
        let mut camera = Camera::new();
        camera.azimuth(90.0);
        assert!((camera.position - Vec3::X).length() < 1e-5);
        assert!((camera.distance() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_positive_elevation_raises_camera() {
        let mut camera = Camera::new();
        camera.elevation(30.0);
        camera.orthogonalize_view_up();
        assert!(camera.position.y > 0.0);
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-5);
    }

    #[test]
    fn test_elevation_over_the_pole_stays_finite() {
        let mut camera = Camera::new();
        camera.elevation(90.0);
        camera.orthogonalize_view_up();
        assert!((camera.position - Vec3::Y).length() < 1e-5);
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-5);

        camera.elevation(10.0);
        camera.orthogonalize_view_up();
        assert!(camera.position.is_finite());
        assert!(camera.view_up.is_finite());
        assert!((camera.distance() - 1.0).abs() < 1e-5);
        assert!(camera.view_projection_matrix(1.0).is_finite());
    }

    #[test]
    fn test_orthogonalize_replaces_parallel_view_up() {
        let mut camera = Camera::new();
        camera.view_up = -Vec3::Z;
        camera.orthogonalize_view_up();
        assert!((camera.view_up.length() - 1.0).abs() < 1e-5);
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-5);
    }

    #[test]
    fn test_reset_repairs_non_finite_view_up() {
        let mut camera = Camera::new();
        camera.view_up = Vec3::NAN;
        camera.reset(unit_box(), 1.0);
        assert!(camera.view_up.is_finite());
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-5);
        assert!(camera.view_projection_matrix(1.0).is_finite());
    }

    #[test]
    fn test_roll_keeps_view_up_perpendicular() {
        let mut camera = Camera::new();
        camera.roll(45.0);
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-5);
        assert!(camera.view_up.x.abs() > 0.1);
    }

    #[test]
    fn test_dolly() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 0.0, 4.0);
        camera.dolly(2.0);
        assert!((camera.distance() - 2.0).abs() < 1e-5);
        camera.dolly(0.0);
        assert!((camera.distance() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_translate_moves_both_points() {
        let mut camera = Camera::new();
        camera.translate(Vec3::X);
        assert_eq!(camera.position, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(camera.focal_point, Vec3::X);
    }

    #[test]
    fn test_projection_perspective() {
        let camera = Camera::new();
        let proj = camera.projection_matrix(1.0);
        // Perspective matrix has non-zero w division
        assert!(proj.w_axis.z != 0.0);
    }

    #[test]
    fn test_world_per_pixel_scales_with_distance() {
        let mut camera = Camera::new();
        let near = camera.world_per_pixel(300);
        camera.dolly(0.5);
        assert!(camera.world_per_pixel(300) > near);
    }
}
