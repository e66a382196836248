use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::{Color, Paint};
use folio_engine::scene::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Single-child box with optional padding, background, border and rounding.
/// An empty `Container` is a no-op.
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Paint>,
    border: Option<Border>,
    corner_radius: f32,
}

impl Container {
    pub fn new() -> Self {
        Self {
            child: None,
            padding: Edges::default(),
            background: None,
            border: None,
            corner_radius: 0.0,
        }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Corner radius; values beyond half the height produce a pill.
    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    fn child_rect(&self, rect: Rect) -> Option<Rect> {
        self.child.as_ref().map(|_| inset_rect(rect, self.padding))
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let child_size = self
            .child
            .as_ref()
            .map(|c| c.measure(constraints.shrink(self.padding), ctx))
            .unwrap_or(Vec2::zero());

        constraints.constrain(Vec2::new(
            child_size.x + self.padding.h(),
            child_size.y + self.padding.v(),
        ))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.background.is_some() || self.border.is_some() {
            let paint = self.background.clone().unwrap_or(Paint::Solid(Color::TRANSPARENT));
            painter.fill_rounded_rect(rect, self.corner_radius, paint, self.border.clone());
        }

        if let (Some(child), Some(child_rect)) = (&self.child, self.child_rect(rect)) {
            child.paint(painter, child_rect);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let Some(child_rect) = self.child_rect(rect) else {
            return EventResult::Ignored;
        };
        match &mut self.child {
            Some(child) => child.on_event(event, child_rect, ctx),
            None => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::text::Gap;
    use folio_engine::text::FontSystem;

    #[test]
    fn padding_wraps_the_child() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::new(&fonts, 1.0);
        let c = Container::new()
            .padding(Edges::symmetric(4.0, 8.0))
            .child(Gap(Vec2::new(20.0, 10.0)));
        let size = c.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::new(36.0, 18.0));
    }

    #[test]
    fn empty_container_paints_nothing() {
        let fonts = FontSystem::new();
        let mut list = folio_engine::scene::DrawList::new();
        let mut painter = Painter::new(&mut list, &fonts, 1.0, folio_engine::scene::ZIndex(0));
        Container::new().paint(&mut painter, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(list.is_empty());
    }
}
