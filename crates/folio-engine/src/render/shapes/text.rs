use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{
    CoordinateSystem, GlyphRasterConfig, HorizontalAlign, Layout, LayoutSettings, TextStyle,
};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::TextAlign;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    group_runs, linear_sampler, texture_bind_group, texture_bind_group_layout, QuadBatch,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer for the glyph atlas.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w` x `h` slot and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > self.size || w + 2 * GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized by fontdue at device resolution (`size * scale_factor`)
/// on first use and cached in a 2048 x 2048 R8 atlas for the renderer's
/// lifetime. The cache key encodes font, glyph and pixel size.
pub struct TextRenderer {
    batch: QuadBatch,

    atlas_layout: Option<wgpu::BindGroupLayout>,
    atlas_texture: Option<wgpu::Texture>,
    atlas_group: Option<wgpu::BindGroup>,
    packer: ShelfPacker,
    warned_full: bool,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            batch: QuadBatch::new("folio text"),
            atlas_layout: None,
            atlas_texture: None,
            atlas_group: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            warned_full: false,
            glyph_cache: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.ensure_atlas(ctx);

        let scale = ctx.scale_factor.max(0.25);
        let mut instances: Vec<GlyphInstance> = Vec::new();
        let mut keys: Vec<(Option<Rect>, Option<usize>)> = Vec::new();

        let cmds: Vec<(crate::scene::shapes::TextCmd, Option<Rect>)> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Text(cmd) => Some((cmd.clone(), item.clip_rect)),
                _ => None,
            })
            .collect();

        for (cmd, clip) in &cmds {
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("text renderer: unknown font {:?}, skipping", cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                max_width: cmd.max_width.map(|w| w * scale),
                horizontal_align: match cmd.align {
                    TextAlign::Left => HorizontalAlign::Left,
                    TextAlign::Center => HorizontalAlign::Center,
                },
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            // Snapshot so the borrow on `self.layout` ends before atlas uploads.
            let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, g.x, g.y, g.width, g.height))
                .collect();

            for (key, x, y, w, h) in glyphs {
                if !self.glyph_cache.contains_key(&key) {
                    let (metrics, bitmap) = font.rasterize_config(key);
                    if metrics.width == 0 || metrics.height == 0 {
                        continue;
                    }
                    let Some(entry) =
                        self.upload_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                    else {
                        continue;
                    };
                    self.glyph_cache.insert(key, entry);
                }
                let Some(cached) = self.glyph_cache.get(&key) else { continue };

                instances.push(GlyphInstance {
                    dst_min: [x / scale, y / scale],
                    dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color: cmd.color.to_array(),
                });
                keys.push((*clip, Some(0)));
            }
        }

        if instances.is_empty() {
            return;
        }

        if !self.batch.is_ready_for(ctx.surface_format) {
            let layout = self.atlas_layout.as_ref();
            self.batch.build_pipeline(
                ctx,
                include_str!("shaders/text.wgsl"),
                GlyphInstance::layout(),
                layout,
            );
        }

        let Some(atlas_group) = self.atlas_group.as_ref() else { return };
        if self.batch.prepare(ctx, &instances) {
            self.batch.draw(ctx, target, &group_runs(&keys), &[atlas_group]);
        }
    }

    fn upload_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let Some((gx, gy)) = self.packer.allocate(w, h) else {
            if !self.warned_full {
                log::warn!("text renderer: glyph atlas is full; some glyphs will not be drawn");
                self.warned_full = true;
            }
            return None;
        };
        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let s = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / s, gy as f32 / s],
            uv_max: [(gx + w) as f32 / s, (gy + h) as f32 / s],
        })
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_group.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("folio text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = linear_sampler(ctx.device, "folio text sampler");
        let layout = texture_bind_group_layout(ctx.device, "folio text atlas bgl");
        let group = texture_bind_group(ctx.device, "folio text atlas", &layout, &view, &sampler);

        self.atlas_texture = Some(texture);
        self.atlas_layout = Some(layout);
        self.atlas_group = Some(group);
        self.packer = ShelfPacker::new(ATLAS_SIZE);
        self.glyph_cache.clear();
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.allocate(10, 5), Some((1, 1)));
        assert_eq!(p.allocate(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: next shelf starts below the tallest glyph (8).
        assert_eq!(p.allocate(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.allocate(14, 14).is_some());
        assert_eq!(p.allocate(4, 4), None);
        assert_eq!(p.allocate(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.allocate(40, 2), None);
    }
}
