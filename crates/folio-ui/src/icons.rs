//! Toggle icons, rasterized from embedded SVG.
//!
//! Icons are drawn white into premultiplied RGBA and tinted at draw time.

use std::fmt;
use std::sync::Arc;

use folio_engine::scene::shapes::ImageData;
use resvg::{tiny_skia, usvg};

/// Icons the site uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IconKind {
    MonitorCog,
    Sun,
    MoonStar,
}

impl IconKind {
    pub fn name(self) -> &'static str {
        match self {
            IconKind::MonitorCog => "monitor-cog",
            IconKind::Sun => "sun",
            IconKind::MoonStar => "moon-star",
        }
    }

    fn svg(self) -> &'static str {
        match self {
            IconKind::MonitorCog => include_str!("../assets/icons/monitor-cog.svg"),
            IconKind::Sun => include_str!("../assets/icons/sun.svg"),
            IconKind::MoonStar => include_str!("../assets/icons/moon-star.svg"),
        }
    }
}

#[derive(Debug)]
pub enum IconError {
    Parse { icon: IconKind, source: usvg::Error },
    /// Requested pixel size was zero or too large for a pixmap.
    Size { icon: IconKind, px: u32 },
}

impl fmt::Display for IconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconError::Parse { icon, source } => {
                write!(f, "icon `{}` failed to parse: {source}", icon.name())
            }
            IconError::Size { icon, px } => {
                write!(f, "icon `{}` cannot be rasterized at {px}px", icon.name())
            }
        }
    }
}

impl std::error::Error for IconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IconError::Parse { source, .. } => Some(source),
            IconError::Size { .. } => None,
        }
    }
}

/// Rasterizes `icon` into a `px` x `px` white image.
pub fn rasterize(icon: IconKind, px: u32) -> Result<ImageData, IconError> {
    let tree = usvg::Tree::from_data(icon.svg().as_bytes(), &usvg::Options::default())
        .map_err(|source| IconError::Parse { icon, source })?;

    let mut pixmap = tiny_skia::Pixmap::new(px, px).ok_or(IconError::Size { icon, px })?;
    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        px as f32 / size.width(),
        px as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    ImageData::new(px, px, pixmap.take()).ok_or(IconError::Size { icon, px })
}

/// The three toggle icons at one raster size.
#[derive(Debug, Clone)]
pub struct IconSet {
    pub monitor_cog: Arc<ImageData>,
    pub sun: Arc<ImageData>,
    pub moon_star: Arc<ImageData>,
}

impl IconSet {
    pub fn rasterize(px: u32) -> Result<Self, IconError> {
        let set = Self {
            monitor_cog: Arc::new(rasterize(IconKind::MonitorCog, px)?),
            sun: Arc::new(rasterize(IconKind::Sun, px)?),
            moon_star: Arc::new(rasterize(IconKind::MoonStar, px)?),
        };
        log::debug!("icons rasterized at {px}px");
        Ok(set)
    }

    pub fn get(&self, icon: IconKind) -> &Arc<ImageData> {
        match icon {
            IconKind::MonitorCog => &self.monitor_cog,
            IconKind::Sun => &self.sun,
            IconKind::MoonStar => &self.moon_star,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_rasterizes_with_visible_white_pixels() {
        for icon in [IconKind::MonitorCog, IconKind::Sun, IconKind::MoonStar] {
            let img = rasterize(icon, 32).unwrap();
            assert_eq!((img.width, img.height), (32, 32));
            assert_eq!(img.pixels.len(), 32 * 32 * 4);

            let mut covered = 0;
            for px in img.pixels.chunks_exact(4) {
                let a = px[3] as i32;
                if a > 0 {
                    covered += 1;
                }
                for &c in &px[..3] {
                    assert!((c as i32 - a).abs() <= 1, "{} is not white", icon.name());
                }
            }
            assert!(covered > 20, "{} rendered almost nothing", icon.name());
        }
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(matches!(rasterize(IconKind::Sun, 0), Err(IconError::Size { px: 0, .. })));
    }

    #[test]
    fn icon_set_images_are_distinct() {
        let set = IconSet::rasterize(16).unwrap();
        assert_ne!(set.sun.id(), set.moon_star.id());
        assert_ne!(set.get(IconKind::MonitorCog).pixels, set.get(IconKind::Sun).pixels);
    }
}
