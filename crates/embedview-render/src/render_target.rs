//! Offscreen render target.

use std::time::Instant;

use embedview_core::{Representation, Scene};
use wgpu::util::DeviceExt;

use crate::actor_render::{ActorRenderData, CameraUniforms};
use crate::gpu::GpuContext;
use crate::pipeline::{ActorPipelines, DEPTH_FORMAT};

/// Color format of the offscreen target. Not sRGB: shaded values are stored as-is.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

struct Attachments {
    color_texture: wgpu::Texture,
    color_view: wgpu::TextureView,
    _depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl Attachments {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let color_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("render target color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("render target depth"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            color_texture,
            color_view,
            _depth_texture: depth_texture,
            depth_view,
        }
    }
}

/// An offscreen surface a [`Scene`] is rendered into.
///
/// Owns the GPU context, the scene and the per-actor GPU buffers. The size only
/// changes through [`RenderTarget::set_size`]; rendering never resizes on its own.
pub struct RenderTarget {
    gpu: GpuContext,
    scene: Scene,
    width: u32,
    height: u32,
    attachments: Attachments,
    pipelines: ActorPipelines,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    actor_data: Vec<Option<ActorRenderData>>,
}

impl RenderTarget {
    /// Creates a render target of `width` x `height` pixels drawing `scene`.
    ///
    /// Zero dimensions are raised to one pixel.
    pub fn new(gpu: GpuContext, width: u32, height: u32, scene: Scene) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let device = &gpu.device;

        let pipelines = ActorPipelines::new(device, COLOR_FORMAT);
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera uniforms"),
            contents: bytemuck::cast_slice(&[CameraUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &pipelines.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let attachments = Attachments::new(device, width, height);

        Self {
            gpu,
            scene,
            width,
            height,
            attachments,
            pipelines,
            camera_buffer,
            camera_bind_group,
            actor_data: Vec::new(),
        }
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Current size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// The color texture holding the last render.
    pub fn color_texture(&self) -> &wgpu::Texture {
        &self.attachments.color_texture
    }

    /// Resizes the attachments. Zero sizes are ignored; the same size is a no-op.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring empty render target size {width}x{height}");
            return;
        }
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!(
            "render target resized {}x{} -> {width}x{height}",
            self.width,
            self.height
        );
        self.width = width;
        self.height = height;
        self.attachments = Attachments::new(&self.gpu.device, width, height);
    }

    /// Uploads meshes of actors added since the last render.
    fn sync_actor_resources(&mut self) {
        let actors = self.scene.actors();
        for actor in &actors[self.actor_data.len()..] {
            self.actor_data.push(ActorRenderData::new(
                &self.gpu.device,
                &self.pipelines.actor_bind_group_layout,
                actor,
            ));
        }
    }

    fn update_uniforms(&self) {
        let uniforms = CameraUniforms::from_camera(self.scene.camera(), self.aspect_ratio());
        self.gpu
            .queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        for (actor, data) in self.scene.actors().iter().zip(&self.actor_data) {
            if let Some(data) = data {
                data.update_uniforms(&self.gpu.queue, actor.property());
            }
        }
    }

    /// Executes one render pass of the scene into the color texture.
    pub fn render(&mut self) {
        let start = Instant::now();
        self.sync_actor_resources();
        self.update_uniforms();

        let background = self.scene.background();
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render target encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render target pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.attachments.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(background.x),
                            g: f64::from(background.y),
                            b: f64::from(background.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.attachments.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for (actor, data) in self.scene.actors().iter().zip(&self.actor_data) {
                let Some(data) = data else {
                    continue;
                };
                if !actor.is_visible() {
                    continue;
                }
                let representation = actor.property().representation;
                render_pass.set_pipeline(self.pipelines.for_representation(representation));
                render_pass.set_bind_group(1, &data.bind_group, &[]);
                render_pass.set_vertex_buffer(0, data.vertex_buffer.slice(..));
                match representation {
                    Representation::Surface => {
                        render_pass.set_index_buffer(
                            data.triangle_index_buffer.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        render_pass.draw_indexed(0..data.num_triangle_indices, 0, 0..1);
                    }
                    Representation::Wireframe => {
                        render_pass.set_index_buffer(
                            data.edge_index_buffer.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        render_pass.draw_indexed(0..data.num_edge_indices, 0, 0..1);
                    }
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        log::trace!("render pass submitted in {:?}", start.elapsed());
    }
}
