//! Paint model shared between UI and renderers.
//!
//! Colors are linear premultiplied alpha. Geometry types live in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, RadialGradient};

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

impl Paint {
    /// True when the paint produces no visible pixels anywhere.
    pub fn is_invisible(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a <= 0.0,
            Paint::LinearGradient(g) => g.from.color.a <= 0.0 && g.to.color.a <= 0.0,
            Paint::RadialGradient(g) => g.from.color.a <= 0.0 && g.to.color.a <= 0.0,
        }
    }
}

impl From<Color> for Paint {
    #[inline]
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<RadialGradient> for Paint {
    #[inline]
    fn from(g: RadialGradient) -> Self {
        Paint::RadialGradient(g)
    }
}
