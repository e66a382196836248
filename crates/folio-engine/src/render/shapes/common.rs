//! Shared GPU types and utilities used by all shape renderers.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Rect, Viewport};
use crate::paint::Paint;
use crate::render::{RenderCtx, RenderTarget};

/// WGSL helpers prepended to every paint-capable shape shader.
pub(super) const PAINT_WGSL: &str = include_str!("shaders/paint.wgsl");

// ── blend ─────────────────────────────────────────────────────────────────

pub fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub size: [f32; 2],
    pub scale: f32,
    pub _pad: f32,
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── paint encoding ────────────────────────────────────────────────────────

pub(super) const PAINT_SOLID: f32 = 0.0;
pub(super) const PAINT_LINEAR: f32 = 1.0;
pub(super) const PAINT_RADIAL: f32 = 2.0;

/// Per-instance paint data consumed by `paint.wgsl`.
///
/// `axis` is `start.xy, end.xy` for linear gradients and `center.xy, radius, _`
/// for radial ones. `params` is `kind, t0, t1, _`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct GpuPaint {
    pub color0: [f32; 4],
    pub color1: [f32; 4],
    pub axis: [f32; 4],
    pub params: [f32; 4],
}

impl GpuPaint {
    pub(super) fn from_paint(paint: &Paint) -> Self {
        match paint {
            Paint::Solid(c) => Self {
                color0: c.to_array(),
                color1: c.to_array(),
                axis: [0.0; 4],
                params: [PAINT_SOLID, 0.0, 1.0, 0.0],
            },
            Paint::LinearGradient(g) => Self {
                color0: g.from.color.to_array(),
                color1: g.to.color.to_array(),
                axis: [g.start.x, g.start.y, g.end.x, g.end.y],
                params: [PAINT_LINEAR, g.from.t, g.to.t, 0.0],
            },
            Paint::RadialGradient(g) => Self {
                color0: g.from.color.to_array(),
                color1: g.to.color.to_array(),
                axis: [g.center.x, g.center.y, g.radius, 0.0],
                params: [PAINT_RADIAL, g.from.t, g.to.t, 0.0],
            },
        }
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor arguments.
///
/// `clip = None` covers the full viewport. Returns `None` for a zero-area
/// result, in which case the draw is skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let px = |v: f32, max: u32| ((v * scale).max(0.0) as u32).min(max);
            let x = px(r.origin.x, phys_vw);
            let y = px(r.origin.y, phys_vh);
            let x2 = px(r.origin.x + r.size.x, phys_vw);
            let y2 = px(r.origin.y + r.size.y, phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

// ── draw runs ─────────────────────────────────────────────────────────────

/// A contiguous range of instances sharing one clip rect and texture slot.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DrawRun {
    pub instances: Range<u32>,
    pub clip: Option<Rect>,
    pub texture: Option<usize>,
}

/// Collapses per-instance `(clip, texture)` keys into consecutive runs.
pub(super) fn group_runs(keys: &[(Option<Rect>, Option<usize>)]) -> Vec<DrawRun> {
    let mut runs: Vec<DrawRun> = Vec::new();
    for (i, &(clip, texture)) in keys.iter().enumerate() {
        let i = i as u32;
        match runs.last_mut() {
            Some(run) if run.clip == clip && run.texture == texture => run.instances.end = i + 1,
            _ => runs.push(DrawRun { instances: i..i + 1, clip, texture }),
        }
    }
    runs
}

// ── texture bindings ──────────────────────────────────────────────────────

/// Layout for `@group(1)`: one filterable 2D texture and its sampler.
pub(super) fn texture_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub(super) fn texture_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(view) },
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(sampler) },
        ],
    })
}

pub(super) fn linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

// ── instanced quad batch ──────────────────────────────────────────────────

/// Pipeline + buffers for one instanced-quad shape renderer.
///
/// Binding 0 of `@group(0)` is the viewport uniform; shape shaders that sample
/// textures put them in `@group(1)`. Resources are created lazily and the
/// pipeline is rebuilt when the surface format changes.
pub(super) struct QuadBatch {
    label: &'static str,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    viewport_bgl: Option<wgpu::BindGroupLayout>,
    viewport_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: u64,
}

impl QuadBatch {
    pub(super) fn new(label: &'static str) -> Self {
        Self {
            label,
            pipeline_format: None,
            pipeline: None,
            viewport_bgl: None,
            viewport_group: None,
            viewport_ubo: None,
            quad_vbo: None,
            quad_ibo: None,
            instance_vbo: None,
            instance_capacity: 0,
        }
    }

    /// True when a pipeline exists for `format`.
    pub(super) fn is_ready_for(&self, format: wgpu::TextureFormat) -> bool {
        self.pipeline_format == Some(format) && self.pipeline.is_some()
    }

    pub(super) fn build_pipeline(
        &mut self,
        ctx: &RenderCtx<'_>,
        shader_src: &str,
        instance_layout: wgpu::VertexBufferLayout<'_>,
        texture_layout: Option<&wgpu::BindGroupLayout>,
    ) {
        let label = self.label;
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let viewport_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let mut layouts = vec![&viewport_bgl];
        layouts.extend(texture_layout);

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &layouts,
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), instance_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
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
        });

        log::debug!("{label}: pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_bgl = Some(viewport_bgl);
        self.viewport_group = None;
        self.viewport_ubo = None;
    }

    /// Uploads the viewport uniform and `instances`. Returns `false` when
    /// there is nothing to draw or resources are missing.
    pub(super) fn prepare<I: Pod>(&mut self, ctx: &RenderCtx<'_>, instances: &[I]) -> bool {
        if instances.is_empty() {
            return false;
        }
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, std::mem::size_of_val(instances) as u64);

        let (Some(ubo), Some(vbo)) = (self.viewport_ubo.as_ref(), self.instance_vbo.as_ref()) else {
            return false;
        };

        let u = ViewportUniform {
            size: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            scale: ctx.scale_factor,
            _pad: 0.0,
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(instances));
        true
    }

    /// Records one render pass drawing every run in order.
    pub(super) fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        runs: &[DrawRun],
        textures: &[&wgpu::BindGroup],
    ) {
        let (Some(pipeline), Some(group), Some(quad_vbo), Some(quad_ibo), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.viewport_group.as_ref(),
            self.quad_vbo.as_ref(),
            self.quad_ibo.as_ref(),
            self.instance_vbo.as_ref(),
        ) else {
            return;
        };

        let mut rpass = target.load_pass(self.label);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for run in runs {
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(run.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            if let Some(slot) = run.texture {
                let Some(texture) = textures.get(slot) else { continue };
                rpass.set_bind_group(1, *texture, &[]);
            }
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..6, 0, run.instances.clone());
        }
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.label),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        self.viewport_ubo = Some(ubo);
        self.viewport_group = Some(group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(self.label),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(self.label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_bytes: u64) {
        if required_bytes <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_bytes.next_power_of_two().max(4096);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: new_cap,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}
