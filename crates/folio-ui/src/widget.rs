use folio_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

/// The core trait every UI component implements.
///
/// Trees are rebuilt every frame, so widgets carry no retained state beyond
/// what is injected into them (theme store, callbacks).
pub trait Widget: 'static {
    /// Size this widget wants under `constraints`.
    ///
    /// Must be deterministic; parents may call it several times per frame.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Draws into `painter` within `rect`, the space allocated by the parent.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Routes an input event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let _ = (event, rect, ctx);
        EventResult::Ignored
    }
}

/// A type-erased widget; the child type of every container.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.0.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        self.0.on_event(event, rect, ctx)
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
