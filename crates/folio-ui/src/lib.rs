//! Folio UI: a small widget tree on top of `folio-engine`.
//!
//! Trees are rebuilt every frame from injected state (mainly the
//! [`theme::ThemeStore`]); [`scene::UiScene::frame`] lays them out, paints
//! them into a draw list and routes pointer input.
//!
//! ```rust,ignore
//! use folio_ui::prelude::*;
//!
//! let mut root: Element = Stack::new()
//!     .item(StackItem::new(ThemeToggle::new(store, &icons, palette.toggle))
//!         .top(AnchorVal::Px(20.0))
//!         .right(AnchorVal::Px(20.0)))
//!     .into();
//! let list = scene.frame(&mut root, viewport, scale, &input, ZIndex(0));
//! ```

pub mod constraints;
pub mod event;
pub mod icons;
pub mod painter;
pub mod render;
pub mod scene;
pub mod theme;
pub mod widget;
pub mod widgets;

/// Everything needed to build pages out of widgets.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::icons::{IconKind, IconSet};
    pub use crate::painter::Painter;
    pub use crate::render::SceneRenderers;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::theme::{Palette, ResolvedTheme, SharedThemeStore, ThemePreference, ThemeStore};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button,
        container::Container,
        flex::{Align, Column, Row},
        icon::Icon,
        stack::{AnchorVal, SizeHint, Stack, StackItem},
        text::{Gap, Text},
        theme_toggle::ThemeToggle,
    };

    pub use folio_engine::coords::{Rect, Vec2, Viewport};
    pub use folio_engine::paint::{Color, Paint};
    pub use folio_engine::scene::shapes::TextAlign;
    pub use folio_engine::scene::{Border, ZIndex};
    pub use folio_engine::text::FontId;
}
