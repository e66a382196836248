mod app;
mod background;
mod cli;
mod fonts;
mod pages;
mod router;

use std::rc::Rc;

use anyhow::Result;
use winit::dpi::LogicalSize;

use folio_engine::device::GpuInit;
use folio_engine::logging::{LoggingConfig, init_logging};
use folio_engine::window::{Runtime, RuntimeConfig};
use folio_hero::HeroProps;
use folio_ui::theme::{SharedThemeStore, ThemeFile, ThemePreference, ThemeStore};

use crate::app::SiteApp;
use crate::cli::{ConfigError, HELP_TEXT, SiteConfig, VERSION};

fn main() -> Result<()> {
    let config = match SiteConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{HELP_TEXT}");
            return Ok(());
        }
        Err(ConfigError::Version) => {
            println!("folio {VERSION}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    for warning in &config.warnings {
        log::warn!("config: {warning}");
    }

    let store = theme_store(&config);
    log::info!("folio {VERSION}: {} ({} theme)", config.route.path(), store.get());

    let runtime = RuntimeConfig {
        title: config.route.title().to_string(),
        initial_size: LogicalSize::new(config.width, config.height),
        ..RuntimeConfig::default()
    };
    let app = SiteApp::new(config.route, Rc::new(store), HeroProps::default());
    Runtime::run(runtime, GpuInit::default(), app)
}

/// An explicit `--theme` wins over the persisted preference and is saved.
fn theme_store(config: &SiteConfig) -> SharedThemeStore {
    let fallback = config.theme.unwrap_or(ThemePreference::System);
    match &config.theme_file {
        Some(path) => {
            let store = SharedThemeStore::with_file(ThemeFile::new(path.clone()), fallback);
            if let Some(pref) = config.theme {
                store.set(pref);
            }
            store
        }
        None => SharedThemeStore::new(fallback),
    }
}
