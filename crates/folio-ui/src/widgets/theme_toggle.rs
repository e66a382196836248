use std::rc::Rc;

use folio_engine::coords::{Rect, Vec2};
use folio_engine::scene::Border;

use crate::constraints::{Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::icons::{IconKind, IconSet};
use crate::painter::Painter;
use crate::theme::{ThemePreference, ThemeStore, TogglePalette};
use crate::widget::{Element, Widget};
use crate::widgets::button::Button;
use crate::widgets::container::Container;
use crate::widgets::flex::{Align, Row};
use crate::widgets::icon::Icon;

const ICON_SIZE: f32 = 16.0;
const BUTTON_PADDING: f32 = 6.0;
const BUTTON_GAP: f32 = 4.0;
const PRESS_SCALE: f32 = 0.85;

fn icon_for(pref: ThemePreference) -> IconKind {
    match pref {
        ThemePreference::System => IconKind::MonitorCog,
        ThemePreference::Light => IconKind::Sun,
        ThemePreference::Dark => IconKind::MoonStar,
    }
}

/// Pill with one button per [`ThemePreference`], in system, light, dark order.
///
/// The button matching the store's current value is drawn inverted; a click
/// on any button writes its value to the store once.
pub struct ThemeToggle {
    root: Element,
    active: ThemePreference,
}

impl ThemeToggle {
    pub fn new(store: Rc<dyn ThemeStore>, icons: &IconSet, palette: TogglePalette) -> Self {
        let active = store.get();

        let buttons = ThemePreference::ALL.map(|pref| {
            let is_active = pref == active;
            let tint = if is_active { palette.active_icon } else { palette.inactive_icon };
            let icon = Icon::new(icons.get(icon_for(pref)).clone(), ICON_SIZE, tint);

            let store = store.clone();
            let mut button = Button::new(icon)
                .padding_all(BUTTON_PADDING)
                .corner_radius(f32::MAX)
                .press_scale(PRESS_SCALE)
                .on_click(move || store.set(pref));
            button = if is_active {
                button
                    .background(palette.active_background)
                    .hover_background(palette.active_background)
                    .press_background(palette.active_background)
            } else {
                button
                    .hover_background(palette.hover_background)
                    .press_background(palette.hover_background)
            };
            button
        });

        let row = Row::new()
            .spacing(BUTTON_GAP)
            .cross_align(Align::Center)
            .children(buttons);

        let root = Container::new()
            .padding(Edges::symmetric(4.0, 8.0))
            .background(palette.track)
            .border(Border::new(1.0, palette.track_border))
            .corner_radius(f32::MAX)
            .child(row);

        Self { root: root.into(), active }
    }

    /// Preference whose button is drawn active.
    pub fn active(&self) -> ThemePreference {
        self.active
    }
}

impl Widget for ThemeToggle {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.root.measure(Constraints::loose(constraints.max), ctx)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.root.paint(painter, rect);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        self.root.on_event(event, rect, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Palette, ResolvedTheme, SharedThemeStore};
    use folio_engine::scene::{DrawCmd, DrawList, ZIndex};
    use folio_engine::text::FontSystem;
    use std::cell::Cell;

    /// Counts writes and remembers the last value.
    struct CountingStore {
        value: Cell<ThemePreference>,
        writes: Cell<u32>,
    }

    impl ThemeStore for CountingStore {
        fn get(&self) -> ThemePreference {
            self.value.get()
        }
        fn set(&self, pref: ThemePreference) {
            self.value.set(pref);
            self.writes.set(self.writes.get() + 1);
        }
        fn subscribe(&self, _listener: Box<dyn FnMut(ThemePreference)>) -> crate::theme::SubscriptionId {
            unreachable!("toggle never subscribes")
        }
        fn unsubscribe(&self, _id: crate::theme::SubscriptionId) {}
    }

    fn icons() -> IconSet {
        IconSet::rasterize(16).unwrap()
    }

    fn layout(toggle: &ThemeToggle, fonts: &FontSystem) -> Rect {
        let size = toggle.measure(Constraints::loose(Vec2::new(800.0, 600.0)), &LayoutCtx::new(fonts, 1.0));
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    /// Button `i` center, given the fixed pill geometry.
    fn button_center(rect: Rect, i: usize) -> Vec2 {
        let button = ICON_SIZE + 2.0 * BUTTON_PADDING;
        let x = rect.origin.x + 8.0 + i as f32 * (button + BUTTON_GAP) + button * 0.5;
        Vec2::new(x, rect.center().y)
    }

    #[test]
    fn pill_has_expected_size() {
        let fonts = FontSystem::default();
        let store: Rc<dyn ThemeStore> = Rc::new(SharedThemeStore::default());
        let toggle = ThemeToggle::new(store, &icons(), Palette::for_theme(ResolvedTheme::Dark).toggle);
        let rect = layout(&toggle, &fonts);
        assert_eq!(rect.size, Vec2::new(108.0, 36.0));
    }

    #[test]
    fn clicking_each_button_writes_its_value_once() {
        let fonts = FontSystem::default();
        let icons = icons();
        let palette = Palette::for_theme(ResolvedTheme::Light).toggle;

        for (i, pref) in ThemePreference::ALL.into_iter().enumerate() {
            let store = Rc::new(CountingStore {
                value: Cell::new(ThemePreference::System),
                writes: Cell::new(0),
            });
            let mut toggle = ThemeToggle::new(store.clone(), &icons, palette);
            let rect = layout(&toggle, &fonts);

            let ctx = LayoutCtx::new(&fonts, 1.0);
            let result = toggle.on_event(&UiEvent::Click { pos: button_center(rect, i) }, rect, &ctx);

            assert_eq!(result, EventResult::Consumed);
            assert_eq!(store.writes.get(), 1);
            assert_eq!(store.get(), pref);
        }
    }

    #[test]
    fn click_between_buttons_writes_nothing() {
        let fonts = FontSystem::default();
        let store = Rc::new(CountingStore {
            value: Cell::new(ThemePreference::Dark),
            writes: Cell::new(0),
        });
        let mut toggle = ThemeToggle::new(store.clone(), &icons(), Palette::for_theme(ResolvedTheme::Dark).toggle);
        let rect = layout(&toggle, &fonts);

        let ctx = LayoutCtx::new(&fonts, 1.0);
        let edge = Vec2::new(rect.origin.x + 2.0, rect.center().y);
        toggle.on_event(&UiEvent::Click { pos: edge }, rect, &ctx);
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn exactly_one_icon_uses_the_active_tint() {
        let fonts = FontSystem::default();
        let icons = icons();

        for theme in [ResolvedTheme::Light, ResolvedTheme::Dark] {
            let palette = Palette::for_theme(theme).toggle;
            for pref in ThemePreference::ALL {
                let store: Rc<dyn ThemeStore> = Rc::new(SharedThemeStore::new(pref));
                let toggle = ThemeToggle::new(store, &icons, palette);
                assert_eq!(toggle.active(), pref);

                let rect = layout(&toggle, &fonts);
                let mut list = DrawList::new();
                {
                    let mut painter = Painter::new(&mut list, &fonts, 1.0, ZIndex(0));
                    toggle.paint(&mut painter, rect);
                }

                let tints: Vec<_> = list
                    .items()
                    .iter()
                    .filter_map(|item| match &item.cmd {
                        DrawCmd::Image(img) => Some(img.tint),
                        _ => None,
                    })
                    .collect();
                assert_eq!(tints.len(), 3);
                assert_eq!(tints.iter().filter(|t| **t == palette.active_icon).count(), 1);

                let active_index = ThemePreference::ALL.iter().position(|p| *p == pref).unwrap();
                assert_eq!(tints[active_index], palette.active_icon);
            }
        }
    }
}
