use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::Color;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── AnchorVal ─────────────────────────────────────────────────────────────

/// Distance from a parent edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorVal {
    Px(f32),
    /// Fraction of the parent's dimension on this axis.
    Pct(f32),
}

impl AnchorVal {
    #[inline]
    pub fn resolve(self, parent_dim: f32) -> f32 {
        match self {
            AnchorVal::Px(v) => v,
            AnchorVal::Pct(p) => parent_dim * p,
        }
    }
}

// ── SizeHint ──────────────────────────────────────────────────────────────

/// How a [`Stack`] child's width or height is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizeHint {
    /// The child's measured size.
    #[default]
    Natural,
    Px(f32),
    Fill,
}

impl SizeHint {
    #[inline]
    pub fn resolve(self, parent_dim: f32, natural: f32) -> f32 {
        match self {
            SizeHint::Natural => natural,
            SizeHint::Px(v) => v,
            SizeHint::Fill => parent_dim,
        }
    }
}

// ── StackItem ─────────────────────────────────────────────────────────────

/// A [`Stack`] child with its anchors.
///
/// Per axis: both anchors stretch; one anchor pins to that edge; none places
/// the child at the origin, or centers it when `center_*` is set.
pub struct StackItem {
    pub element: Element,
    pub left: Option<AnchorVal>,
    pub top: Option<AnchorVal>,
    pub right: Option<AnchorVal>,
    pub bottom: Option<AnchorVal>,
    pub width: SizeHint,
    pub height: SizeHint,
    center_x: bool,
    center_y: bool,
}

impl StackItem {
    pub fn new(element: impl Into<Element>) -> Self {
        Self {
            element: element.into(),
            left: None,
            top: None,
            right: None,
            bottom: None,
            width: SizeHint::Natural,
            height: SizeHint::Natural,
            center_x: false,
            center_y: false,
        }
    }

    pub fn left(mut self, v: AnchorVal) -> Self { self.left = Some(v); self }
    pub fn top(mut self, v: AnchorVal) -> Self { self.top = Some(v); self }
    pub fn right(mut self, v: AnchorVal) -> Self { self.right = Some(v); self }
    pub fn bottom(mut self, v: AnchorVal) -> Self { self.bottom = Some(v); self }
    pub fn width(mut self, v: SizeHint) -> Self { self.width = v; self }
    pub fn height(mut self, v: SizeHint) -> Self { self.height = v; self }
    pub fn center_x(mut self) -> Self { self.center_x = true; self }
    pub fn center_y(mut self) -> Self { self.center_y = true; self }

    pub fn compute_rect(&self, parent: Rect, ctx: &LayoutCtx) -> Rect {
        let (pw, ph) = (parent.width(), parent.height());
        let natural = self.element.measure(Constraints::loose(parent.size), ctx);

        let w = match (self.left, self.right) {
            (Some(l), Some(r)) => (pw - l.resolve(pw) - r.resolve(pw)).max(0.0),
            _ => self.width.resolve(pw, natural.x),
        };
        let h = match (self.top, self.bottom) {
            (Some(t), Some(b)) => (ph - t.resolve(ph) - b.resolve(ph)).max(0.0),
            _ => self.height.resolve(ph, natural.y),
        };

        let x = match (self.left, self.right) {
            (Some(l), _) => l.resolve(pw),
            (None, Some(r)) => pw - r.resolve(pw) - w,
            (None, None) if self.center_x => (pw - w) * 0.5,
            (None, None) => 0.0,
        };
        let y = match (self.top, self.bottom) {
            (Some(t), _) => t.resolve(ph),
            (None, Some(b)) => ph - b.resolve(ph) - h,
            (None, None) if self.center_y => (ph - h) * 0.5,
            (None, None) => 0.0,
        };

        Rect::new(parent.origin.x + x, parent.origin.y + y, w, h)
    }
}

// ── Stack ─────────────────────────────────────────────────────────────────

/// Overlay container positioning each child by its anchors.
///
/// Children paint in insertion order (first = bottom); events route in
/// reverse so the topmost child is hit-tested first.
pub struct Stack {
    children: Vec<StackItem>,
    bg: Option<Color>,
}

impl Stack {
    pub fn new() -> Self {
        Self { children: Vec::new(), bg: None }
    }

    pub fn item(mut self, item: StackItem) -> Self {
        self.children.push(item);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Stack {
    /// A stack always takes all the space it is offered.
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let w = if constraints.max.x.is_finite() { constraints.max.x } else { 0.0 };
        let h = if constraints.max.y.is_finite() { constraints.max.y } else { 0.0 };
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(color) = self.bg {
            painter.fill_rect(rect, color);
        }

        let ctx = painter.layout_ctx();
        for item in &self.children {
            let child_rect = item.compute_rect(rect, &ctx);
            item.element.paint(painter, child_rect);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        for item in self.children.iter_mut().rev() {
            let child_rect = item.compute_rect(rect, ctx);
            if item.element.on_event(event, child_rect, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::text::Gap;
    use folio_engine::text::FontSystem;

    #[test]
    fn top_right_anchor_pins_natural_size() {
        let fonts = FontSystem::default();
        let ctx = LayoutCtx::new(&fonts, 1.0);
        let item = StackItem::new(Gap(Vec2::new(110.0, 38.0)))
            .top(AnchorVal::Px(20.0))
            .right(AnchorVal::Px(20.0));
        let r = item.compute_rect(Rect::new(0.0, 0.0, 800.0, 600.0), &ctx);
        assert_eq!(r, Rect::new(670.0, 20.0, 110.0, 38.0));
    }

    #[test]
    fn centered_item_sits_in_the_middle() {
        let fonts = FontSystem::default();
        let ctx = LayoutCtx::new(&fonts, 1.0);
        let item = StackItem::new(Gap(Vec2::new(100.0, 50.0))).center_x().center_y();
        let r = item.compute_rect(Rect::new(10.0, 0.0, 300.0, 150.0), &ctx);
        assert_eq!(r, Rect::new(110.0, 50.0, 100.0, 50.0));
    }
}
