use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// CPU-side RGBA8 bitmap, premultiplied alpha, row-major.
///
/// Each instance gets a process-unique id the image renderer uses as its
/// texture cache key.
#[derive(Debug, PartialEq)]
pub struct ImageData {
    id: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Returns `None` when `pixels` does not hold exactly `width * height` texels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Image draw payload. `tint` multiplies every texel (premultiplied).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub rect: Rect,
    pub image: Arc<ImageData>,
    pub tint: Color,
}

impl DrawList {
    pub fn push_image(&mut self, z: ZIndex, rect: Rect, image: Arc<ImageData>, tint: Color) {
        self.push(z, DrawCmd::Image(ImageCmd { rect, image, tint }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_rejects_mismatched_pixel_count() {
        assert!(ImageData::new(2, 2, vec![0; 15]).is_none());
        assert!(ImageData::new(0, 2, vec![]).is_none());
    }

    #[test]
    fn images_get_distinct_ids() {
        let a = ImageData::new(1, 1, vec![0; 4]).unwrap();
        let b = ImageData::new(1, 1, vec![0; 4]).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
