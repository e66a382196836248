//! Text block shown over the hero mesh.

use folio_ui::prelude::*;

use crate::props::HeroProps;

/// Width of the centered column that holds both the mesh and the text.
pub const COLUMN_MAX_WIDTH: f32 = 1024.0;

const ZINC_300: u32 = 0xd4d4d8;
const ZINC_400: u32 = 0xa1a1aa;

/// Layout tier chosen from the window width.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Base,
    /// 768 px and up.
    Md,
    /// 1024 px and up.
    Lg,
}

impl Breakpoint {
    pub fn for_width(width: f32) -> Self {
        if width >= 1024.0 {
            Breakpoint::Lg
        } else if width >= 768.0 {
            Breakpoint::Md
        } else {
            Breakpoint::Base
        }
    }

    pub fn title_size(self) -> f32 {
        match self {
            Breakpoint::Base => 30.0,
            Breakpoint::Md => 48.0,
            Breakpoint::Lg => 60.0,
        }
    }

    pub fn description_size(self) -> f32 {
        match self {
            Breakpoint::Base => 14.0,
            Breakpoint::Md | Breakpoint::Lg => 16.0,
        }
    }

    /// Centered below `Md`, left-aligned from `Md` up.
    pub fn alignment(self) -> (Align, TextAlign) {
        match self {
            Breakpoint::Base => (Align::Center, TextAlign::Center),
            Breakpoint::Md | Breakpoint::Lg => (Align::Start, TextAlign::Left),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayFonts {
    pub regular: FontId,
    pub semibold: FontId,
}

/// Rect of the hero column inside `area`: full height, at most
/// [`COLUMN_MAX_WIDTH`] wide, horizontally centered.
pub fn column_rect(area: Rect) -> Rect {
    let w = area.width().min(COLUMN_MAX_WIDTH);
    Rect::new(area.origin.x + (area.width() - w) * 0.5, area.origin.y, w, area.height())
}

/// Subtitle, title and description, vertically centered in the column.
pub fn hero_overlay(props: &HeroProps, fonts: OverlayFonts, viewport: Viewport) -> Element {
    let bp = Breakpoint::for_width(viewport.width);
    let (cross, align) = bp.alignment();
    let column_w = viewport.width.min(COLUMN_MAX_WIDTH);

    let text = Column::new()
        .cross_align(cross)
        .padding(Edges::horizontal(24.0))
        .child(
            Text::new(props.subtitle_text().to_uppercase(), fonts.semibold, 12.0, Color::from_hex(ZINC_400, 1.0))
                .align(align),
        )
        .child(Gap::height(16.0))
        .child(
            Text::new(props.title_text(), fonts.semibold, bp.title_size(), Color::WHITE)
                .align(align)
                .max_width(768.0),
        )
        .child(Gap::height(20.0))
        .child(
            Text::new(
                props.description_text(),
                fonts.regular,
                bp.description_size(),
                Color::from_hex(ZINC_300, 1.0),
            )
            .align(align)
            .max_width(576.0),
        );

    Stack::new()
        .item(StackItem::new(text).width(SizeHint::Px(column_w)).center_x().center_y())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_follow_width() {
        assert_eq!(Breakpoint::for_width(375.0), Breakpoint::Base);
        assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1023.0), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1440.0), Breakpoint::Lg);
    }

    #[test]
    fn title_grows_with_breakpoint() {
        assert!(Breakpoint::Base.title_size() < Breakpoint::Md.title_size());
        assert!(Breakpoint::Md.title_size() < Breakpoint::Lg.title_size());
    }

    #[test]
    fn small_screens_center_text() {
        assert_eq!(Breakpoint::Base.alignment(), (Align::Center, TextAlign::Center));
        assert_eq!(Breakpoint::Lg.alignment(), (Align::Start, TextAlign::Left));
    }

    #[test]
    fn column_is_capped_and_centered() {
        let wide = column_rect(Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert_eq!(wide, Rect::new(448.0, 0.0, 1024.0, 1080.0));
        let narrow = column_rect(Rect::new(0.0, 0.0, 600.0, 800.0));
        assert_eq!(narrow, Rect::new(0.0, 0.0, 600.0, 800.0));
    }

    #[test]
    fn default_props_paint_the_default_strings() {
        use crate::props::{DEFAULT_DESCRIPTION, DEFAULT_SUBTITLE, DEFAULT_TITLE};
        use folio_engine::scene::DrawCmd;
        use folio_ui::scene::{UiInput, UiScene};

        let viewport = Viewport::new(1280.0, 800.0);
        let fonts = OverlayFonts { regular: FontId::default(), semibold: FontId::default() };
        let mut root = hero_overlay(&HeroProps::default(), fonts, viewport);
        let mut scene = UiScene::new();
        let list = scene.frame(&mut root, viewport, 1.0, &UiInput::default(), ZIndex(0));

        let texts: Vec<&str> = list
            .items()
            .iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![DEFAULT_SUBTITLE, DEFAULT_TITLE, DEFAULT_DESCRIPTION]);
    }
}
