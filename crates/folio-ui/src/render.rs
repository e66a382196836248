use folio_engine::render::shapes::{
    CircleRenderer, ImageRenderer, RectRenderer, RoundedRectRenderer, TextRenderer,
};
use folio_engine::render::{RenderCtx, RenderTarget};
use folio_engine::scene::DrawList;
use folio_engine::text::FontSystem;

/// One instance of every 2D renderer, drawn in a fixed shape order.
///
/// Z-order holds within a shape kind; across kinds, rects come first, then
/// rounded rects, circles, images and text.
#[derive(Default)]
pub struct SceneRenderers {
    rect: RectRenderer,
    rounded_rect: RoundedRectRenderer,
    circle: CircleRenderer,
    image: ImageRenderer,
    text: TextRenderer,
}

impl SceneRenderers {
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
        if draw_list.is_empty() {
            return;
        }
        self.rect.render(ctx, target, draw_list);
        self.rounded_rect.render(ctx, target, draw_list);
        self.circle.render(ctx, target, draw_list);
        self.image.render(ctx, target, draw_list);
        self.text.render(ctx, target, draw_list, fonts);
    }
}
