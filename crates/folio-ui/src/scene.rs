use folio_engine::coords::{Rect, Vec2, Viewport};
use folio_engine::input::{InputFrame, InputState, MouseButton};
use folio_engine::scene::{DrawList, ZIndex};
use folio_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Pointer snapshot for one UI frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiInput {
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer: Option<Vec2>,
    /// Primary button is held.
    pub pressed: bool,
    /// Primary button was released this frame.
    pub clicked: bool,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            pointer: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            pressed: state.button_down(MouseButton::Left),
            clicked: frame.released(MouseButton::Left),
        }
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Owns the fonts and the draw list a widget tree is painted into.
///
/// Fields are public so callers can split-borrow `draw_list` and
/// `font_system` when handing both to the renderers.
#[derive(Default)]
pub struct UiScene {
    pub font_system: FontSystem,
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Lays out, paints and routes input for `root` over the whole viewport.
    ///
    /// Items are recorded from `base_z` upward. Events are delivered after
    /// painting, so a click's effect shows on the next frame.
    pub fn frame(
        &mut self,
        root: &mut Element,
        viewport: Viewport,
        scale: f32,
        input: &UiInput,
        base_z: ZIndex,
    ) -> &mut DrawList {
        self.draw_list.clear();

        let size = Vec2::new(viewport.width, viewport.height);
        let rect = Rect::from_origin_size(Vec2::zero(), size);
        {
            let ctx = LayoutCtx::new(&self.font_system, scale);
            let _ = root.measure(Constraints::tight(size), &ctx);
        }

        {
            let mut painter = Painter::new(&mut self.draw_list, &self.font_system, scale, base_z)
                .with_pointer(input.pointer, input.pressed);
            root.paint(&mut painter, rect);
        }

        let ctx = LayoutCtx::new(&self.font_system, scale);
        root.on_event(&UiEvent::Hover { pos: input.pointer }, rect, &ctx);
        if let (true, Some(pos)) = (input.clicked, input.pointer) {
            if root.on_event(&UiEvent::Click { pos }, rect, &ctx).is_consumed() {
                log::trace!("click at ({:.0}, {:.0}) consumed", pos.x, pos.y);
            }
        }

        &mut self.draw_list
    }
}
