use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::ImageData;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    group_runs, linear_sampler, texture_bind_group, texture_bind_group_layout, QuadBatch,
};

/// Frames an uploaded texture may go unused before it is dropped.
const EVICT_AFTER_FRAMES: u64 = 600;

struct CachedImage {
    group: wgpu::BindGroup,
    last_used: u64,
}

/// Renderer for `DrawCmd::Image`.
///
/// Each distinct [`ImageData`] is uploaded once as an `Rgba8Unorm` texture and
/// cached by its id; textures unused for a while are evicted.
pub struct ImageRenderer {
    batch: QuadBatch,
    texture_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    cache: HashMap<u64, CachedImage>,
    frame: u64,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self {
            batch: QuadBatch::new("folio image"),
            texture_layout: None,
            sampler: None,
            cache: HashMap::new(),
            frame: 0,
        }
    }
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.frame = self.frame.wrapping_add(1);
        self.ensure_shared(ctx);

        let mut instances: Vec<ImageInstance> = Vec::new();
        let mut keys: Vec<(Option<Rect>, Option<usize>)> = Vec::new();
        let mut slots: Vec<u64> = Vec::new();

        let cmds: Vec<(crate::scene::shapes::ImageCmd, Option<Rect>)> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Image(cmd) => Some((cmd.clone(), item.clip_rect)),
                _ => None,
            })
            .collect();

        for (cmd, clip) in &cmds {
            if cmd.rect.is_empty() || cmd.tint.a <= 0.0 {
                continue;
            }
            let id = cmd.image.id();
            self.ensure_uploaded(ctx, &cmd.image);
            let Some(cached) = self.cache.get_mut(&id) else { continue };
            cached.last_used = self.frame;

            let slot = match slots.iter().position(|&s| s == id) {
                Some(i) => i,
                None => {
                    slots.push(id);
                    slots.len() - 1
                }
            };

            let max = cmd.rect.max();
            instances.push(ImageInstance {
                dst_min: [cmd.rect.origin.x, cmd.rect.origin.y],
                dst_max: [max.x, max.y],
                tint: cmd.tint.to_array(),
            });
            keys.push((*clip, Some(slot)));
        }

        let frame = self.frame;
        self.cache
            .retain(|_, c| frame.wrapping_sub(c.last_used) < EVICT_AFTER_FRAMES);

        if instances.is_empty() {
            return;
        }

        if !self.batch.is_ready_for(ctx.surface_format) {
            let layout = self.texture_layout.as_ref();
            self.batch.build_pipeline(
                ctx,
                include_str!("shaders/image.wgsl"),
                ImageInstance::layout(),
                layout,
            );
        }

        let groups: Vec<&wgpu::BindGroup> = slots
            .iter()
            .filter_map(|id| self.cache.get(id).map(|c| &c.group))
            .collect();
        if groups.len() != slots.len() {
            return;
        }

        if self.batch.prepare(ctx, &instances) {
            self.batch.draw(ctx, target, &group_runs(&keys), &groups);
        }
    }

    fn ensure_shared(&mut self, ctx: &RenderCtx<'_>) {
        if self.texture_layout.is_none() {
            self.texture_layout = Some(texture_bind_group_layout(ctx.device, "folio image bgl"));
        }
        if self.sampler.is_none() {
            self.sampler = Some(linear_sampler(ctx.device, "folio image sampler"));
        }
    }

    fn ensure_uploaded(&mut self, ctx: &RenderCtx<'_>, image: &ImageData) {
        if self.cache.contains_key(&image.id()) {
            return;
        }
        let (Some(layout), Some(sampler)) = (self.texture_layout.as_ref(), self.sampler.as_ref())
        else {
            return;
        };

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("folio image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let group = texture_bind_group(ctx.device, "folio image", layout, &view, sampler);
        log::debug!("image renderer: uploaded image {} ({}x{})", image.id(), image.width, image.height);

        self.cache.insert(image.id(), CachedImage { group, last_used: self.frame });
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ImageInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    tint: [f32; 4],
}

impl ImageInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x4  // tint
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
