use std::path::Path;

use folio_engine::text::{FontId, FontLoadError};
use folio_hero::overlay::OverlayFonts;
use folio_ui::scene::UiScene;

const REGULAR: [&str; 6] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

const SEMIBOLD: [&str; 7] = [
    "/usr/share/fonts/noto/NotoSans-SemiBold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-SemiBold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
];

/// Loads the first readable candidate into `scene`.
fn load_first(scene: &mut UiScene, candidates: &[&str]) -> Option<FontId> {
    candidates.iter().find_map(|path| {
        match scene.font_system.load_font_file(Path::new(path)) {
            Ok(id) => {
                log::debug!("fonts: loaded {path}");
                Some(id)
            }
            Err(FontLoadError::Io { .. }) => None,
            Err(err) => {
                log::warn!("fonts: {path}: {err}");
                None
            }
        }
    })
}

/// Regular and semibold faces for the hero text. Falls back to the regular
/// face for both weights; `None` when no system font could be loaded.
pub fn load_overlay_fonts(scene: &mut UiScene) -> Option<OverlayFonts> {
    let Some(regular) = load_first(scene, &REGULAR) else {
        log::warn!("fonts: no system font found, hero text will not be drawn");
        return None;
    };
    let semibold = load_first(scene, &SEMIBOLD).unwrap_or_else(|| {
        log::debug!("fonts: no semibold face, using regular");
        regular
    });
    Some(OverlayFonts { regular, semibold })
}
