use folio_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the cross-axis extent.
    Stretch,
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, available: f32, child: f32) -> f32 {
        match self {
            Align::Stretch | Align::Start => 0.0,
            Align::Center => (available - child) * 0.5,
            Align::End => available - child,
        }
    }
}

/// Shared layout for both axes. `main` selects x (Row) or y (Column).
struct FlexLayout {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl FlexLayout {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            spacing: 0.0,
            padding: Edges::default(),
            cross_align: Align::Start,
        }
    }

    fn spacing_total(&self) -> f32 {
        self.children.len().saturating_sub(1) as f32 * self.spacing
    }

    fn child_constraints(&self, horizontal: bool, inner: Vec2) -> Constraints {
        let stretch = self.cross_align == Align::Stretch;
        if horizontal {
            let min_y = if stretch && inner.y.is_finite() { inner.y } else { 0.0 };
            Constraints { min: Vec2::new(0.0, min_y), max: Vec2::new(f32::INFINITY, inner.y) }
        } else {
            let min_x = if stretch && inner.x.is_finite() { inner.x } else { 0.0 };
            Constraints { min: Vec2::new(min_x, 0.0), max: Vec2::new(inner.x, f32::INFINITY) }
        }
    }

    fn measure(&self, horizontal: bool, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding).max;
        let child_c = self.child_constraints(horizontal, inner);
        let sizes = self.children.iter().map(|c| c.measure(child_c, ctx));

        let (mut main, mut cross) = (0.0f32, 0.0f32);
        for s in sizes {
            let (m, c) = if horizontal { (s.x, s.y) } else { (s.y, s.x) };
            main += m;
            cross = cross.max(c);
        }
        main += self.spacing_total();

        let size = if horizontal {
            Vec2::new(main + self.padding.h(), cross + self.padding.v())
        } else {
            Vec2::new(cross + self.padding.h(), main + self.padding.v())
        };
        constraints.constrain(size)
    }

    /// Child rects for `rect`, in child order.
    fn layout(&self, horizontal: bool, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(horizontal, inner.size);

        let mut cursor = if horizontal { inner.origin.x } else { inner.origin.y };
        self.children
            .iter()
            .map(|child| {
                let s = child.measure(child_c, ctx);
                let r = if horizontal {
                    let h = if self.cross_align == Align::Stretch { inner.height() } else { s.y };
                    let y = inner.origin.y + self.cross_align.offset(inner.height(), h);
                    Rect::new(cursor, y, s.x, h)
                } else {
                    let w = if self.cross_align == Align::Stretch { inner.width() } else { s.x };
                    let x = inner.origin.x + self.cross_align.offset(inner.width(), w);
                    Rect::new(x, cursor, w, s.y)
                };
                cursor += (if horizontal { s.x } else { s.y }) + self.spacing;
                r
            })
            .collect()
    }

    fn paint(&self, horizontal: bool, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        let rects = self.layout(horizontal, rect, &ctx);
        for (child, r) in self.children.iter().zip(rects) {
            child.paint(painter, r);
        }
    }

    fn on_event(
        &mut self,
        horizontal: bool,
        event: &UiEvent,
        rect: Rect,
        ctx: &LayoutCtx<'_>,
    ) -> EventResult {
        let rects = self.layout(horizontal, rect, ctx);
        for (child, r) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

macro_rules! flex_container {
    ($(#[$doc:meta])* $name:ident, $horizontal:expr) => {
        $(#[$doc])*
        pub struct $name {
            flex: FlexLayout,
        }

        impl $name {
            pub fn new() -> Self {
                Self { flex: FlexLayout::new() }
            }

            pub fn spacing(mut self, v: f32) -> Self {
                self.flex.spacing = v;
                self
            }

            pub fn padding(mut self, edges: Edges) -> Self {
                self.flex.padding = edges;
                self
            }

            pub fn cross_align(mut self, align: Align) -> Self {
                self.flex.cross_align = align;
                self
            }

            pub fn child(mut self, child: impl Into<Element>) -> Self {
                self.flex.children.push(child.into());
                self
            }

            pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
                self.flex.children.extend(iter.into_iter().map(Into::into));
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Widget for $name {
            fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
                self.flex.measure($horizontal, constraints, ctx)
            }

            fn paint(&self, painter: &mut Painter, rect: Rect) {
                self.flex.paint($horizontal, painter, rect)
            }

            fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
                self.flex.on_event($horizontal, event, rect, ctx)
            }
        }
    };
}

flex_container!(
    /// Vertical flex container; children stack top to bottom.
    Column,
    false
);

flex_container!(
    /// Horizontal flex container; children run left to right.
    Row,
    true
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::text::Gap;
    use folio_engine::text::FontSystem;

    fn ctx(fonts: &FontSystem) -> LayoutCtx<'_> {
        LayoutCtx::new(fonts, 1.0)
    }

    #[test]
    fn row_measures_children_plus_spacing_and_padding() {
        let fonts = FontSystem::default();
        let row = Row::new()
            .spacing(4.0)
            .padding(Edges::symmetric(4.0, 8.0))
            .children([Gap(Vec2::new(28.0, 28.0)), Gap(Vec2::new(28.0, 28.0)), Gap(Vec2::new(28.0, 28.0))]);
        let size = row.measure(Constraints::unbounded(), &ctx(&fonts));
        assert_eq!(size, Vec2::new(8.0 + 28.0 * 3.0 + 4.0 * 2.0 + 8.0, 36.0));
    }

    #[test]
    fn column_centers_on_cross_axis() {
        let fonts = FontSystem::default();
        let col = Column::new()
            .cross_align(Align::Center)
            .child(Gap(Vec2::new(10.0, 5.0)))
            .child(Gap(Vec2::new(30.0, 5.0)));
        let rects = col.flex.layout(false, Rect::new(0.0, 0.0, 100.0, 50.0), &ctx(&fonts));
        assert_eq!(rects[0], Rect::new(45.0, 0.0, 10.0, 5.0));
        assert_eq!(rects[1], Rect::new(35.0, 5.0, 30.0, 5.0));
    }
}
