use std::sync::Arc;

use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::Color;
use folio_engine::scene::shapes::ImageData;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Square tinted image, drawn centered in its rect.
pub struct Icon {
    image: Arc<ImageData>,
    size: f32,
    tint: Color,
}

impl Icon {
    pub fn new(image: Arc<ImageData>, size: f32, tint: Color) -> Self {
        Self { image, size, tint }
    }
}

impl Widget for Icon {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(self.size, self.size))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let side = self.size.min(rect.width()).min(rect.height());
        painter.image(rect.centered(side, side), self.image.clone(), self.tint);
    }
}
