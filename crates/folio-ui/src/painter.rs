use std::sync::Arc;

use folio_engine::coords::{CornerRadii, Rect, Vec2};
use folio_engine::paint::{Color, Paint};
use folio_engine::scene::shapes::{ImageData, TextAlign, TextCmd};
use folio_engine::scene::{Border, DrawList, ZIndex};
use folio_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` and exposes the frame's pointer state so
/// widgets can express hover and press visuals directly while painting.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    pub(crate) font_system: &'a FontSystem,
    pub scale: f32,
    z: i32,
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer: Option<Vec2>,
    /// True while the primary button is held.
    pub pointer_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        font_system: &'a FontSystem,
        scale: f32,
        base_z: ZIndex,
    ) -> Self {
        Self {
            draw_list,
            font_system,
            scale,
            z: base_z.0,
            pointer: None,
            pointer_pressed: false,
        }
    }

    /// Sets the pointer snapshot used by [`is_hovered`](Self::is_hovered).
    pub fn with_pointer(mut self, pointer: Option<Vec2>, pressed: bool) -> Self {
        self.pointer = pointer;
        self.pointer_pressed = pressed;
        self
    }

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.pointer_pressed && self.is_hovered(rect)
    }

    /// Measures `text` at the renderer's physical scale.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.font_system.measure_text(text, font, size, max_width, self.scale)
    }

    /// Layout context borrowing this painter's fonts, for re-measuring children.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx::new(self.font_system, self.scale)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, paint.into());
    }

    /// Rounded rectangle; `radius` is clamped to half the shorter side.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        let radii = CornerRadii::all(radius).clamped(rect.width(), rect.height());
        self.draw_list.push_rounded_rect(z, rect, radii, paint.into(), border);
    }

    /// Text block with its first line's top-left at `origin`.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
        align: TextAlign,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(
            z,
            TextCmd { text: text.into(), font, size, color, origin, max_width, align },
        );
    }

    /// Image stretched over `rect`, multiplied by `tint`.
    pub fn image(&mut self, rect: Rect, image: Arc<ImageData>, tint: Color) {
        let z = self.next_z();
        self.draw_list.push_image(z, rect, image, tint);
    }

    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
