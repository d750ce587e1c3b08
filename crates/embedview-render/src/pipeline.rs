//! Render pipelines for actors.

use embedview_core::Representation;

use crate::actor_render::Vertex;

/// Depth format of the offscreen render target.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Bind group layouts and pipelines used to draw actors.
pub struct ActorPipelines {
    /// Camera uniforms (group 0).
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    /// Actor uniforms (group 1).
    pub actor_bind_group_layout: wgpu::BindGroupLayout,
    surface: wgpu::RenderPipeline,
    wireframe: wgpu::RenderPipeline,
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

impl ActorPipelines {
    /// Creates the surface and wireframe pipelines for the given color format.
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let camera_bind_group_layout = uniform_layout(
            device,
            "camera bind group layout",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let actor_bind_group_layout = uniform_layout(
            device,
            "actor bind group layout",
            wgpu::ShaderStages::FRAGMENT,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("actor pipeline layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &actor_bind_group_layout],
            push_constant_ranges: &[],
        });

        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let surface = build("actor surface pipeline", wgpu::PrimitiveTopology::TriangleList);
        let wireframe = build("actor wireframe pipeline", wgpu::PrimitiveTopology::LineList);

        Self {
            camera_bind_group_layout,
            actor_bind_group_layout,
            surface,
            wireframe,
        }
    }

    /// Pipeline for the given representation.
    pub fn for_representation(&self, representation: Representation) -> &wgpu::RenderPipeline {
        match representation {
            Representation::Surface => &self.surface,
            Representation::Wireframe => &self.wireframe,
        }
    }
}
