use folio_engine::scene::DrawList;
use folio_hero::HeroProps;
use folio_hero::backdrop::paint_backdrop;
use folio_hero::overlay::{OverlayFonts, hero_overlay};
use folio_ui::prelude::*;

/// Overlay text over the hero; nothing when no font could be loaded.
pub fn resume_page(props: &HeroProps, fonts: Option<OverlayFonts>, viewport: Viewport) -> Element {
    match fonts {
        Some(fonts) => hero_overlay(props, fonts, viewport),
        None => Stack::new().into(),
    }
}

/// Glows and vignette behind the wireframe.
pub fn paint_resume_backdrop(list: &mut DrawList, area: Rect) {
    paint_backdrop(list, area, ZIndex(0));
}
