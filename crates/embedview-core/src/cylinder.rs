//! Procedural cylinder generator.

use glam::Vec3;

use crate::mesh::PolyMesh;

/// Generates a faceted cylinder centered on `center` with its axis along +Y.
///
/// Side facets get outward normals; when capping is on, the caps get their own
/// copies of the rim points so they can carry flat ±Y normals.
#[derive(Debug, Clone)]
pub struct CylinderSource {
    height: f32,
    radius: f32,
    center: Vec3,
    resolution: u32,
    capping: bool,
}

impl Default for CylinderSource {
    fn default() -> Self {
        Self {
            height: 1.0,
            radius: 0.5,
            center: Vec3::ZERO,
            resolution: 6,
            capping: true,
        }
    }
}

impl CylinderSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of facets around the axis (at least 3).
    #[must_use]
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution.max(3);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    #[must_use]
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn with_capping(mut self, capping: bool) -> Self {
        self.capping = capping;
        self
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Builds the mesh.
    pub fn build(&self) -> PolyMesh {
        let res = self.resolution;
        let step = std::f32::consts::TAU / res as f32;
        let half = 0.5 * self.height;

        let num_points = if self.capping { 4 * res } else { 2 * res } as usize;
        let mut positions = Vec::with_capacity(num_points);
        let mut normals = Vec::with_capacity(num_points);
        let mut polygons = Vec::with_capacity(res as usize + 2);

        let rim = |i: u32| {
            let angle = i as f32 * step;
            Vec3::new(angle.cos(), 0.0, -angle.sin())
        };

        // Side: point 2i on the top rim, 2i + 1 on the bottom rim
        for i in 0..res {
            let n = rim(i);
            let p = self.center + n * self.radius;
            positions.push(p + Vec3::Y * half);
            normals.push(n);
            positions.push(p - Vec3::Y * half);
            normals.push(n);
        }
        for i in 0..res {
            let next = (i + 1) % res;
            polygons.push(vec![2 * i, 2 * i + 1, 2 * next + 1, 2 * next]);
        }

        if self.capping {
            let top_start = 2 * res;
            let bottom_start = 3 * res;
            for i in 0..res {
                let p = self.center + rim(i) * self.radius;
                positions.push(p + Vec3::Y * half);
                normals.push(Vec3::Y);
            }
            for i in 0..res {
                let p = self.center + rim(i) * self.radius;
                positions.push(p - Vec3::Y * half);
                normals.push(Vec3::NEG_Y);
            }
            polygons.push((0..res).map(|i| top_start + i).collect());
            polygons.push((0..res).rev().map(|i| bottom_start + i).collect());
        }

        log::debug!(
            "cylinder source: {} points, {} polygons",
            positions.len(),
            polygons.len()
        );
        PolyMesh::new(positions, normals, polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_cylinder_counts() {
        let mesh = CylinderSource::new().with_resolution(20).build();
        assert_eq!(mesh.num_points(), 80);
        assert_eq!(mesh.num_polygons(), 22);
        // 20 side quads -> 40 triangles, two 20-gons -> 2 * 18 triangles
        assert_eq!(mesh.triangles().len(), 40 + 36);
    }

    #[test]
    fn test_uncapped_cylinder_counts() {
        let mesh = CylinderSource::new()
            .with_resolution(8)
            .with_capping(false)
            .build();
        assert_eq!(mesh.num_points(), 16);
        assert_eq!(mesh.num_polygons(), 8);
    }

    #[test]
    fn test_resolution_clamped() {
        let source = CylinderSource::new().with_resolution(1);
        assert_eq!(source.resolution(), 3);
    }

    #[test]
    fn test_default_bounds() {
        let bounds = CylinderSource::new()
            .with_resolution(20)
            .build()
            .bounds()
            .unwrap();
        assert!((bounds.max.y - 0.5).abs() < 1e-6);
        assert!((bounds.min.y + 0.5).abs() < 1e-6);
        assert!((bounds.max.x - 0.5).abs() < 1e-6);
        assert!((bounds.min.x + 0.5).abs() < 1e-6);
        assert!(bounds.center().length() < 1e-6);
    }

    #[test]
    fn test_normals_are_unit_and_outward() {
        let mesh = CylinderSource::new()
            .with_resolution(12)
            .with_center(Vec3::new(1.0, 2.0, 3.0))
            .build();
        let center = Vec3::new(1.0, 2.0, 3.0);
        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!((*p - center).dot(*n) > 0.0, "normal {n} points inward at {p}");
        }
    }

    #[test]
    fn test_side_quads_wrap_around() {
        let mesh = CylinderSource::new().with_resolution(4).build();
        let last_side = &mesh.polygons()[3];
        assert_eq!(last_side, &vec![6, 7, 1, 0]);
    }
}
