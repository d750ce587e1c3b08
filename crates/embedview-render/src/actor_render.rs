//! Actor GPU rendering resources.

use embedview_core::{Actor, Camera, PolyMesh, Property};
use wgpu::util::DeviceExt;

/// Interleaved vertex: position then normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout matching `mesh.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Camera uniforms for GPU.
/// Note: Layout must match WGSL `CameraUniforms` (160 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Camera position (w unused).
    pub camera_pos: [f32; 4],
    /// Headlight direction, pointing from the camera into the scene (w unused).
    pub light_dir: [f32; 4],
}

impl CameraUniforms {
    /// Builds the uniforms for a camera and viewport aspect ratio.
    pub fn from_camera(camera: &Camera, aspect_ratio: f32) -> Self {
        let dir = camera.direction_of_projection();
        Self {
            view_proj: camera.view_projection_matrix(aspect_ratio).to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            light_dir: dir.extend(0.0).to_array(),
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::from_camera(&Camera::default(), 1.0)
    }
}

/// Per-actor uniforms.
/// Note: Layout must match WGSL `ActorUniforms` (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ActorUniforms {
    /// Surface color (RGBA)
    pub color: [f32; 4],
    /// Ambient, diffuse, specular, specular power
    pub lighting: [f32; 4],
}

impl From<&Property> for ActorUniforms {
    fn from(property: &Property) -> Self {
        Self {
            color: property.color.extend(1.0).to_array(),
            lighting: [
                property.ambient,
                property.diffuse,
                property.specular,
                property.specular_power,
            ],
        }
    }
}

/// Flattens a mesh into interleaved vertices.
pub fn mesh_vertices(mesh: &PolyMesh) -> Vec<Vertex> {
    mesh.positions()
        .iter()
        .zip(mesh.normals())
        .map(|(p, n)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

/// GPU resources for drawing one actor.
pub struct ActorRenderData {
    /// Interleaved position/normal buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// Triangle list indices for the surface representation.
    pub triangle_index_buffer: wgpu::Buffer,
    /// Line list indices for the wireframe representation.
    pub edge_index_buffer: wgpu::Buffer,
    pub num_triangle_indices: u32,
    pub num_edge_indices: u32,
    /// Uniform buffer for the actor's property.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group for this actor (group 1).
    pub bind_group: wgpu::BindGroup,
}

impl ActorRenderData {
    /// Uploads an actor's mesh. Returns `None` for meshes with nothing to draw.
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        actor: &Actor,
    ) -> Option<Self> {
        let mesh = actor.mesh();
        let triangles: Vec<u32> = mesh.triangles().into_iter().flatten().collect();
        let edges: Vec<u32> = mesh.edges().into_iter().flatten().collect();
        if triangles.is_empty() {
            return None;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("actor vertices"),
            contents: bytemuck::cast_slice(&mesh_vertices(mesh)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("actor triangle indices"),
            contents: bytemuck::cast_slice(&triangles),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("actor edge indices"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("actor uniforms"),
            contents: bytemuck::cast_slice(&[ActorUniforms::from(actor.property())]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("actor bind group"),
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Some(Self {
            vertex_buffer,
            triangle_index_buffer,
            edge_index_buffer,
            num_triangle_indices: triangles.len() as u32,
            num_edge_indices: edges.len() as u32,
            uniform_buffer,
            bind_group,
        })
    }

    /// Uploads the actor's current property.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, property: &Property) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[ActorUniforms::from(property)]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedview_core::{CylinderSource, Vec3};

    #[test]
    fn test_uniform_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 160);
        assert_eq!(std::mem::size_of::<ActorUniforms>(), 32);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_actor_uniforms_from_property() {
        let mut property = Property::default();
        property.set_color(Vec3::new(1.0, 0.0, 0.0));
        let uniforms = ActorUniforms::from(&property);
        assert_eq!(uniforms.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(uniforms.lighting, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_camera_uniforms_headlight() {
        let uniforms = CameraUniforms::default();
        assert_eq!(uniforms.light_dir, [0.0, 0.0, -1.0, 0.0]);
        assert_eq!(uniforms.camera_pos, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_mesh_vertices_interleave() {
        let mesh = CylinderSource::new().with_resolution(5).build();
        let vertices = mesh_vertices(&mesh);
        assert_eq!(vertices.len(), mesh.num_points());
        assert_eq!(vertices[0].position, mesh.positions()[0].to_array());
        assert_eq!(vertices[0].normal, mesh.normals()[0].to_array());
    }
}
