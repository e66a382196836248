//! wgpu implementation of the hero backend.
//!
//! [`HeroGpu`] owns the mesh buffers, the uniform buffer and the wireframe
//! pipeline for one mounted hero. [`WgpuBackend`] is built per frame around
//! the engine's render context and the slot the hero occupies in the window.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use folio_engine::coords::Rect;
use folio_engine::render::{RenderCtx, RenderTarget, premul_alpha_blend};
use wgpu::util::DeviceExt;

use crate::geometry::{IcosphereMesh, MeshVertex};
use crate::hero::{FrameUniforms, GpuResources, HeroBackend};
use crate::host::{SurfaceId, SurfaceSize};
use crate::shading::WIRE_ALPHA;

const LABEL: &str = "folio hero";

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct HeroUniform {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    layers: [[f32; 4]; 3],
    params: [f32; 4],
    target_info: [f32; 4],
}

impl HeroUniform {
    fn new(u: &FrameUniforms, srgb_target: bool) -> Self {
        let d = &u.displacement;
        Self {
            view_proj: u.view_proj.to_cols_array_2d(),
            model: u.model.to_cols_array_2d(),
            layers: d.layers.map(|l| [l.frequency, l.time_scale, l.weight, 0.0]),
            params: [u.time, d.time_rate, d.amplitude, WIRE_ALPHA],
            target_info: [if srgb_target { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// GPU side of a mounted hero.
pub struct HeroGpu {
    surface: SurfaceId,
    size: SurfaceSize,

    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipeline: wgpu::RenderPipeline,
    pipeline_format: wgpu::TextureFormat,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl HeroGpu {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        mesh: &IcosphereMesh,
        size: SurfaceSize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(LABEL),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/hero.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(LABEL),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<HeroUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(LABEL),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("folio hero uniforms"),
            size: std::mem::size_of::<HeroUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(LABEL),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("folio hero vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("folio hero lines"),
            contents: bytemuck::cast_slice(&mesh.line_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let pipeline = build_pipeline(device, &shader, &pipeline_layout, format);
        log::debug!(
            "hero gpu: allocated {} vertices, {} indices for {:?}",
            mesh.vertices.len(),
            mesh.line_indices.len(),
            format
        );

        Self {
            surface: SurfaceId::next(),
            size,
            shader,
            pipeline_layout,
            pipeline,
            pipeline_format: format,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            index_buffer,
            index_count: mesh.line_indices.len() as u32,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Uploads `uniforms` and records one pass drawing the wireframe into `slot`.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        slot: Rect,
        uniforms: &FrameUniforms,
    ) {
        if self.pipeline_format != ctx.surface_format {
            self.pipeline =
                build_pipeline(ctx.device, &self.shader, &self.pipeline_layout, ctx.surface_format);
            self.pipeline_format = ctx.surface_format;
        }

        let Some(view) = SlotView::new(slot, ctx.scale_factor, ctx.physical_size()) else {
            return;
        };

        let frame = FrameUniforms { view_proj: view.ndc_fix * uniforms.view_proj, ..*uniforms };
        let u = HeroUniform::new(&frame, ctx.surface_format.is_srgb());
        ctx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let mut rpass = target.load_pass(LABEL);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        let v = view.visible;
        rpass.set_viewport(v.origin.x, v.origin.y, v.size.x, v.size.y, 0.0, 1.0);
        let [x, y, w, h] = view.scissor;
        rpass.set_scissor_rect(x, y, w, h);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl GpuResources for HeroGpu {
    fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    fn set_surface_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn release(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
        log::debug!("hero gpu: released surface {}", self.surface.get());
    }
}

/// Per-frame backend bound to the engine's render context.
pub struct WgpuBackend<'a, 't> {
    ctx: &'a RenderCtx<'a>,
    target: &'a mut RenderTarget<'t>,
    slot: Rect,
}

impl<'a, 't> WgpuBackend<'a, 't> {
    /// `slot` is the hero surface's rect in logical pixels.
    pub fn new(ctx: &'a RenderCtx<'a>, target: &'a mut RenderTarget<'t>, slot: Rect) -> Self {
        Self { ctx, target, slot }
    }
}

impl HeroBackend for WgpuBackend<'_, '_> {
    type Resources = HeroGpu;

    fn allocate(&mut self, mesh: &IcosphereMesh, size: SurfaceSize) -> HeroGpu {
        HeroGpu::new(self.ctx.device, self.ctx.surface_format, mesh, size)
    }

    fn draw(&mut self, resources: &mut HeroGpu, uniforms: &FrameUniforms) {
        let size = resources.size();
        let slot = Rect::from_origin_size(
            self.slot.origin,
            folio_engine::coords::Vec2::new(size.width as f32, size.height as f32),
        );
        resources.draw(self.ctx, self.target, slot, uniforms);
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(LABEL),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[MeshVertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Placement of the hero slot on the render target, in physical pixels.
///
/// wgpu rejects viewports reaching past the target, so a slot hanging off an
/// edge is drawn through a viewport over its visible part only. `ndc_fix`
/// maps the full slot's clip space onto that viewport, keeping the slot's
/// aspect and position.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SlotView {
    visible: Rect,
    scissor: [u32; 4],
    ndc_fix: Mat4,
}

impl SlotView {
    fn new(slot: Rect, scale: f32, (target_w, target_h): (u32, u32)) -> Option<Self> {
        let full = Rect::new(
            slot.origin.x * scale,
            slot.origin.y * scale,
            slot.size.x * scale,
            slot.size.y * scale,
        );
        let visible = full.intersect(Rect::new(0.0, 0.0, target_w as f32, target_h as f32))?;

        let (vx, vy, vw, vh) = (visible.origin.x, visible.origin.y, visible.size.x, visible.size.y);
        let (sx, sy, sw, sh) = (full.origin.x, full.origin.y, full.size.x, full.size.y);
        let scale_xy = Vec3::new(sw / vw, sh / vh, 1.0);
        let offset = Vec3::new(
            (2.0 * (sx - vx) + sw) / vw - 1.0,
            1.0 - (2.0 * (sy - vy) + sh) / vh,
            0.0,
        );
        let ndc_fix = Mat4::from_translation(offset) * Mat4::from_scale(scale_xy);

        let x = (vx.round() as u32).min(target_w);
        let y = (vy.round() as u32).min(target_h);
        let w = ((vx + vw).round() as u32).min(target_w).saturating_sub(x);
        let h = ((vy + vh).round() as u32).min(target_h).saturating_sub(y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(Self { visible, scissor: [x, y, w, h], ndc_fix })
    }
}
