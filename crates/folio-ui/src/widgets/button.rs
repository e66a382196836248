use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::{Color, Paint};
use folio_engine::scene::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A clickable widget wrapping any child content.
///
/// Hover and press visuals are read from the `Painter`, so the button can be
/// rebuilt every frame without retained state.
pub struct Button {
    child: Element,
    on_click: Option<Box<dyn FnMut()>>,

    background: Color,
    hover_background: Color,
    press_background: Color,
    border: Option<Border>,
    corner_radius: f32,
    padding: Edges,
    /// Content scale while pressed (1.0 = none).
    press_scale: f32,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_click: None,
            background: Color::TRANSPARENT,
            hover_background: Color::TRANSPARENT,
            press_background: Color::TRANSPARENT,
            border: None,
            corner_radius: 0.0,
            padding: Edges::default(),
            press_scale: 1.0,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = color;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn press_scale(mut self, s: f32) -> Self {
        self.press_scale = s.clamp(0.1, 1.0);
        self
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let child_size = self.child.measure(constraints.shrink(self.padding), ctx);
        constraints.constrain(Vec2::new(
            child_size.x + self.padding.h(),
            child_size.y + self.padding.v(),
        ))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let pressed = painter.is_pressed(rect);
        let bg = if pressed {
            self.press_background
        } else if painter.is_hovered(rect) {
            self.hover_background
        } else {
            self.background
        };

        let drawn = if pressed && self.press_scale < 1.0 {
            rect.centered(rect.width() * self.press_scale, rect.height() * self.press_scale)
        } else {
            rect
        };

        if bg.a > 0.0 || self.border.is_some() {
            painter.fill_rounded_rect(drawn, self.corner_radius, Paint::Solid(bg), self.border.clone());
        }
        let inner = inset_rect(rect, self.padding);
        let inner = if drawn == rect {
            inner
        } else {
            inner.centered(inner.width() * self.press_scale, inner.height() * self.press_scale)
        };
        self.child.paint(painter, inner);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                if let Some(f) = &mut self.on_click {
                    f();
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}
