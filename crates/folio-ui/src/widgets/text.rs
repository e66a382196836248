use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::Color;
use folio_engine::scene::shapes::TextAlign;
use folio_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A single-run text block, wrapped to the parent's width.
///
/// # Example
/// ```rust,ignore
/// Text::new("Energy dances along unseen frontiers.", bold, 48.0, Color::WHITE)
///     .max_width(768.0)
/// ```
pub struct Text {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    max_width: Option<f32>,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            color,
            align: TextAlign::Left,
            max_width: None,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Wrap width cap in logical pixels, applied on top of the parent's.
    pub fn max_width(mut self, w: f32) -> Self {
        self.max_width = Some(w);
        self
    }

    fn wrap_width(&self, available: Option<f32>) -> Option<f32> {
        match (available, self.max_width) {
            (Some(a), Some(m)) => Some(a.min(m)),
            (a, m) => a.or(m),
        }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let wrap = self.wrap_width(constraints.finite_max_width());
        let size = ctx.fonts.measure_text(&self.text, self.font, self.size, wrap, ctx.scale);
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let wrap = self.wrap_width((rect.width() > 0.0).then_some(rect.width()));
        painter.text(&self.text, self.font, self.size, self.color, rect.origin, wrap, self.align);
    }
}

/// Fixed-size empty box, used for gaps between siblings.
#[derive(Debug, Copy, Clone)]
pub struct Gap(pub Vec2);

impl Gap {
    pub fn height(h: f32) -> Self {
        Self(Vec2::new(0.0, h))
    }

    pub fn width(w: f32) -> Self {
        Self(Vec2::new(w, 0.0))
    }
}

impl Widget for Gap {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(self.0)
    }

    fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
}
