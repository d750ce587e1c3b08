//! Polygonal mesh geometry.

use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Computes the bounds of a point set, or `None` if it is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere circumscribing the box.
    pub fn radius(&self) -> f32 {
        self.extents().length() * 0.5
    }
}

/// A mesh made of planar polygons with per-point normals.
///
/// Polygons are kept as-is so the wireframe shows facet outlines; rendering
/// uses [`PolyMesh::triangles`] which fans every polygon.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    polygons: Vec<Vec<u32>>,
}

impl PolyMesh {
    /// Creates a mesh from points, per-point normals and polygon index lists.
    ///
    /// Polygons with fewer than three corners are dropped.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, polygons: Vec<Vec<u32>>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        let polygons = polygons.into_iter().filter(|p| p.len() >= 3).collect();
        Self {
            positions,
            normals,
            polygons,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn polygons(&self) -> &[Vec<u32>] {
        &self.polygons
    }

    pub fn num_points(&self) -> usize {
        self.positions.len()
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.positions)
    }

    /// Triangulates every polygon as a fan around its first corner.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::new();
        for polygon in &self.polygons {
            for i in 1..polygon.len() - 1 {
                triangles.push([polygon[0], polygon[i], polygon[i + 1]]);
            }
        }
        triangles
    }

    /// Returns the outline edges of every polygon.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges = Vec::new();
        for polygon in &self.polygons {
            for (i, &a) in polygon.iter().enumerate() {
                let b = polygon[(i + 1) % polygon.len()];
                edges.push([a, b]);
            }
        }
        edges
    }
}
