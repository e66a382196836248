//! Shape renderers.

pub(crate) mod common;

pub mod circle;
pub mod image;
pub mod rect;
pub mod rounded_rect;
pub mod text;

pub use circle::CircleRenderer;
pub use image::ImageRenderer;
pub use rect::RectRenderer;
pub use rounded_rect::RoundedRectRenderer;
pub use text::TextRenderer;
