use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{group_runs, GpuPaint, QuadBatch, PAINT_WGSL};

/// Renderer for `DrawCmd::Rect` (solid, linear and radial paints).
///
/// Geometry is in logical pixels and converted to NDC in the vertex shader.
pub struct RectRenderer {
    batch: QuadBatch,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self { batch: QuadBatch::new("folio rect") }
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let mut instances: Vec<RectInstance> = Vec::new();
        let mut keys: Vec<(Option<Rect>, Option<usize>)> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue };
            if cmd.rect.is_empty() || cmd.paint.is_invisible() {
                continue;
            }
            instances.push(RectInstance {
                origin: [cmd.rect.origin.x, cmd.rect.origin.y],
                size: [cmd.rect.size.x, cmd.rect.size.y],
                paint: GpuPaint::from_paint(&cmd.paint),
            });
            keys.push((item.clip_rect, None));
        }

        if instances.is_empty() {
            return;
        }

        if !self.batch.is_ready_for(ctx.surface_format) {
            let src = format!("{PAINT_WGSL}\n{}", include_str!("shaders/rect.wgsl"));
            self.batch.build_pipeline(ctx, &src, RectInstance::layout(), None);
        }

        if self.batch.prepare(ctx, &instances) {
            self.batch.draw(ctx, target, &group_runs(&keys), &[]);
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    paint: GpuPaint,
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // color0
        4 => Float32x4, // color1
        5 => Float32x4, // axis
        6 => Float32x4  // params
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
