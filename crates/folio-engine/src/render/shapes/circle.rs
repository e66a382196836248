use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{group_runs, GpuPaint, QuadBatch, PAINT_WGSL};

/// Renderer for `DrawCmd::Circle`. Borders are an antialiased inner ring.
pub struct CircleRenderer {
    batch: QuadBatch,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self { batch: QuadBatch::new("folio circle") }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let mut instances: Vec<CircleInstance> = Vec::new();
        let mut keys: Vec<(Option<Rect>, Option<usize>)> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Circle(cmd) = &item.cmd else { continue };
            if cmd.radius <= 0.0 {
                continue;
            }
            let (border_width, border_color) = match &cmd.border {
                Some(b) => (b.width.max(0.0), b.color.to_array()),
                None => (0.0, [0.0; 4]),
            };
            instances.push(CircleInstance {
                center: [cmd.center.x, cmd.center.y],
                radius_border: [cmd.radius, border_width],
                border_color,
                paint: GpuPaint::from_paint(&cmd.paint),
            });
            keys.push((item.clip_rect, None));
        }

        if instances.is_empty() {
            return;
        }

        if !self.batch.is_ready_for(ctx.surface_format) {
            let src = format!("{PAINT_WGSL}\n{}", include_str!("shaders/circle.wgsl"));
            self.batch.build_pipeline(ctx, &src, CircleInstance::layout(), None);
        }

        if self.batch.prepare(ctx, &instances) {
            self.batch.draw(ctx, target, &group_runs(&keys), &[]);
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_border: [f32; 2],
    border_color: [f32; 4],
    paint: GpuPaint,
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius, border width
        3 => Float32x4, // border_color
        4 => Float32x4, // color0
        5 => Float32x4, // color1
        6 => Float32x4, // axis
        7 => Float32x4  // params
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
