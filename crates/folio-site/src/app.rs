use std::rc::Rc;
use std::time::Instant;

use winit::event::WindowEvent;
use winit::window::{Theme, WindowId};

use folio_engine::core::{App, AppControl, FrameCtx};
use folio_engine::scene::DrawList;
use folio_hero::gpu::{HeroGpu, WgpuBackend};
use folio_hero::overlay::{OverlayFonts, column_rect};
use folio_hero::{
    FrameLoop, Hero, HeroContainer, HeroPhase, HeroProps, HostCtx, MountOutcome, ResizeListeners,
    SurfaceId, SurfaceSize,
};
use folio_ui::prelude::*;
use folio_ui::theme::SubscriptionId;

use crate::background::FlowingPaths;
use crate::fonts::load_overlay_fonts;
use crate::pages::landing::{landing_page, paint_landing_backdrop};
use crate::pages::resume::{paint_resume_backdrop, resume_page};
use crate::router::Route;

/// Toggle icons are rasterized at twice their logical size.
const ICON_PX: u32 = 32;

const UI_BASE_Z: ZIndex = ZIndex(10);

// ── hero host ─────────────────────────────────────────────────────────────

/// The resume page's hero column, standing in for the DOM container.
#[derive(Debug, Default)]
pub struct HeroSlot {
    pub bounds: Rect,
    surface: Option<SurfaceId>,
}

impl HeroContainer for HeroSlot {
    fn client_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.bounds.width().max(0.0).round() as u32,
            self.bounds.height().max(0.0).round() as u32,
        )
    }

    fn append_surface(&mut self, surface: SurfaceId) {
        if let Some(old) = self.surface.replace(surface) {
            log::warn!("hero slot: surface {} replaced by {}", old.get(), surface.get());
        }
    }

    fn contains_surface(&self, surface: SurfaceId) -> bool {
        self.surface == Some(surface)
    }

    fn remove_surface(&mut self, surface: SurfaceId) {
        if self.contains_surface(surface) {
            self.surface = None;
        }
    }
}

#[derive(Debug, Default)]
struct HeroHost {
    slot: HeroSlot,
    frames: FrameLoop,
    resize: ResizeListeners,
}

impl HeroHost {
    fn ctx(&mut self) -> HostCtx<'_> {
        HostCtx {
            container: Some(&mut self.slot),
            frames: &mut self.frames,
            resize: &mut self.resize,
        }
    }
}

fn resolved_from_winit(theme: Theme) -> ResolvedTheme {
    match theme {
        Theme::Light => ResolvedTheme::Light,
        Theme::Dark => ResolvedTheme::Dark,
    }
}

// ── app ───────────────────────────────────────────────────────────────────

/// One window showing one route.
pub struct SiteApp {
    route: Route,
    store: Rc<dyn ThemeStore>,
    subscription: SubscriptionId,
    icons: Option<IconSet>,

    ui: UiScene,
    ui_renderers: SceneRenderers,
    // Drawn with its own renderers: each renderer uploads one instance
    // buffer per frame, so two lists cannot share one.
    backdrop: DrawList,
    backdrop_renderers: SceneRenderers,

    background: FlowingPaths,
    started: Instant,

    hero: Hero<HeroGpu>,
    overlay_fonts: Option<OverlayFonts>,
    host: HeroHost,
    resize_pending: bool,
}

impl SiteApp {
    pub fn new(route: Route, store: Rc<dyn ThemeStore>, props: HeroProps) -> Self {
        let subscription = store.subscribe(Box::new(|pref| log::info!("theme: {pref}")));

        let icons = match IconSet::rasterize(ICON_PX) {
            Ok(icons) => Some(icons),
            Err(err) => {
                log::warn!("icons: {err}; theme toggle disabled");
                None
            }
        };

        let mut ui = UiScene::new();
        let overlay_fonts = match route {
            Route::Resume => load_overlay_fonts(&mut ui),
            Route::Landing => None,
        };

        Self {
            route,
            store,
            subscription,
            icons,
            ui,
            ui_renderers: SceneRenderers::new(),
            backdrop: DrawList::new(),
            backdrop_renderers: SceneRenderers::new(),
            background: FlowingPaths::new(),
            started: Instant::now(),
            hero: Hero::new(props),
            overlay_fonts,
            host: HeroHost::default(),
            resize_pending: false,
        }
    }

    /// Builds this frame's backdrop and widget tree; returns the clear color.
    fn build(&mut self, area: Rect, platform: Option<ResolvedTheme>, now: Instant) -> (Color, Element) {
        self.backdrop.clear();
        match self.route {
            Route::Landing => {
                let palette = Palette::for_theme(self.store.get().resolve(platform));
                let time = now.saturating_duration_since(self.started).as_secs_f32();
                paint_landing_backdrop(&mut self.backdrop, &self.background, area, time, &palette);
                let root = match &self.icons {
                    Some(icons) => landing_page(self.store.clone(), icons, &palette),
                    None => Stack::new().into(),
                };
                (palette.background, root)
            }
            Route::Resume => {
                paint_resume_backdrop(&mut self.backdrop, area);
                self.host.slot.bounds = column_rect(area);
                if std::mem::take(&mut self.resize_pending) && !self.host.resize.is_empty() {
                    if let Some(size) = self.hero.resize(&self.host.slot) {
                        log::debug!("resume: hero resized to {}x{}", size.width, size.height);
                    }
                }
                let viewport = Viewport::new(area.width(), area.height());
                (Color::BLACK, resume_page(self.hero.props(), self.overlay_fonts, viewport))
            }
        }
    }
}

impl App for SiteApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. }) {
            self.resize_pending = true;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }
        let scale = ctx.window.scale_factor();
        let area = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        let now = ctx.time.now;
        let input = UiInput::from_engine(ctx.input, ctx.input_frame);
        let platform = ctx.window.system_theme().map(resolved_from_winit);

        let (clear, mut root) = self.build(area, platform, now);
        let _ = self.ui.frame(&mut root, viewport, scale, &input, UI_BASE_Z);

        let route = self.route;
        let backdrop = &mut self.backdrop;
        let backdrop_renderers = &mut self.backdrop_renderers;
        let ui_list = &mut self.ui.draw_list;
        let fonts = &self.ui.font_system;
        let ui_renderers = &mut self.ui_renderers;
        let hero = &mut self.hero;
        let host = &mut self.host;

        ctx.render(clear, |rctx, target| {
            backdrop_renderers.render(rctx, target, backdrop, fonts);

            if route == Route::Resume {
                let slot = host.slot.bounds;
                let mut backend = WgpuBackend::new(rctx, target, slot);
                if hero.phase() == HeroPhase::Uninitialized {
                    if let MountOutcome::NoContainer = hero.mount(host.ctx(), &mut backend, now) {
                        log::warn!("resume: hero has no container");
                    }
                }
                for _task in host.frames.live_tasks() {
                    hero.frame(&mut backend, now);
                }
            }

            ui_renderers.render(rctx, target, ui_list, fonts);
        })
    }

    fn on_window_closing(&mut self, _window_id: WindowId) {
        self.hero.unmount(self.host.ctx());
        self.store.unsubscribe(self.subscription);
        log::debug!("site: closed {}", self.route);
    }
}
