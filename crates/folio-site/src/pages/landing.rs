use std::rc::Rc;

use folio_engine::scene::DrawList;
use folio_ui::prelude::*;

use crate::background::FlowingPaths;

/// Inset of the theme toggle from the top-right corner.
pub const TOGGLE_INSET: f32 = 20.0;

/// The toggle pinned to the top-right corner.
pub fn landing_page(store: Rc<dyn ThemeStore>, icons: &IconSet, palette: &Palette) -> Element {
    Stack::new()
        .item(
            StackItem::new(ThemeToggle::new(store, icons, palette.toggle))
                .top(AnchorVal::Px(TOGGLE_INSET))
                .right(AnchorVal::Px(TOGGLE_INSET)),
        )
        .into()
}

/// Flowing paths in the foreground color; the page color comes from the clear.
pub fn paint_landing_backdrop(
    list: &mut DrawList,
    background: &FlowingPaths,
    area: Rect,
    time: f32,
    palette: &Palette,
) {
    background.paint(list, area, time, palette.foreground, ZIndex(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::scene::DrawCmd;
    use folio_ui::scene::UiScene;

    #[test]
    fn toggle_sits_in_the_top_right_corner() {
        let store: Rc<dyn ThemeStore> = Rc::new(SharedThemeStore::new(ThemePreference::System));
        let icons = IconSet::rasterize(16).expect("icons");
        let palette = Palette::for_theme(ResolvedTheme::Dark);
        let mut scene = UiScene::new();
        let mut root = landing_page(store, &icons, &palette);

        let list = scene.frame(
            &mut root,
            Viewport::new(1000.0, 600.0),
            1.0,
            &UiInput::default(),
            ZIndex(10),
        );
        let pill = list
            .items()
            .iter()
            .find_map(|item| match &item.cmd {
                DrawCmd::RoundedRect(r) => Some(r.rect),
                _ => None,
            })
            .expect("toggle pill");
        assert_eq!(pill.origin.y, TOGGLE_INSET);
        assert!((pill.max().x - (1000.0 - TOGGLE_INSET)).abs() < 1e-3);
    }

    #[test]
    fn backdrop_uses_foreground_color() {
        let palette = Palette::for_theme(ResolvedTheme::Light);
        let mut list = DrawList::new();
        paint_landing_backdrop(
            &mut list,
            &FlowingPaths::new(),
            Rect::new(0.0, 0.0, 800.0, 600.0),
            1.0,
            &palette,
        );
        assert!(!list.is_empty());
    }
}
