use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{group_runs, GpuPaint, QuadBatch, PAINT_WGSL};

/// Renderer for `DrawCmd::RoundedRect`.
///
/// Edges are antialiased with a signed-distance function evaluated per
/// fragment; the optional border is drawn inside the shape.
pub struct RoundedRectRenderer {
    batch: QuadBatch,
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self { batch: QuadBatch::new("folio rounded rect") }
    }
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let mut instances: Vec<RoundedRectInstance> = Vec::new();
        let mut keys: Vec<(Option<Rect>, Option<usize>)> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::RoundedRect(cmd) = &item.cmd else { continue };
            if cmd.rect.is_empty() {
                continue;
            }
            let (border_width, border_color) = match &cmd.border {
                Some(b) => (b.width.max(0.0), b.color.to_array()),
                None => (0.0, [0.0; 4]),
            };
            if border_width == 0.0 && cmd.paint.is_invisible() {
                continue;
            }
            let r = cmd.rect;
            instances.push(RoundedRectInstance {
                origin: [r.origin.x, r.origin.y],
                size: [r.size.x, r.size.y],
                radii: cmd.radii.clamped(r.size.x, r.size.y).to_array(),
                border_color,
                border_width: [border_width, 0.0, 0.0, 0.0],
                paint: GpuPaint::from_paint(&cmd.paint),
            });
            keys.push((item.clip_rect, None));
        }

        if instances.is_empty() {
            return;
        }

        if !self.batch.is_ready_for(ctx.surface_format) {
            let src = format!("{PAINT_WGSL}\n{}", include_str!("shaders/rounded_rect.wgsl"));
            self.batch.build_pipeline(ctx, &src, RoundedRectInstance::layout(), None);
        }

        if self.batch.prepare(ctx, &instances) {
            self.batch.draw(ctx, target, &group_runs(&keys), &[]);
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radii: [f32; 4],
    border_color: [f32; 4],
    border_width: [f32; 4],
    paint: GpuPaint,
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // radii
        4 => Float32x4, // border_color
        5 => Float32x4, // border_width
        6 => Float32x4, // color0
        7 => Float32x4, // color1
        8 => Float32x4, // axis
        9 => Float32x4  // params
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
