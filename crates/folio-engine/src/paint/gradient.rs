use crate::coords::Vec2;

use super::Color;

/// A gradient stop at offset `t` along the gradient axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Two-stop linear gradient in logical pixel space.
///
/// Outside `[from.t, to.t]` the edge color is padded.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub from: ColorStop,
    pub to: ColorStop,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, from: ColorStop, to: ColorStop) -> Self {
        Self { start, end, from, to }
    }

    /// Offset of `p` projected on the start→end axis (0 at start, 1 at end).
    pub fn offset_at(&self, p: Vec2) -> f32 {
        let axis = self.end - self.start;
        let len2 = axis.x * axis.x + axis.y * axis.y;
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        let d = p - self.start;
        (d.x * axis.x + d.y * axis.y) / len2
    }

    pub fn color_at(&self, p: Vec2) -> Color {
        blend_stops(self.from, self.to, self.offset_at(p))
    }
}

/// Two-stop circular gradient: offset 0 at `center`, 1 at `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub from: ColorStop,
    pub to: ColorStop,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32, from: ColorStop, to: ColorStop) -> Self {
        Self { center, radius, from, to }
    }

    pub fn offset_at(&self, p: Vec2) -> f32 {
        if self.radius <= f32::EPSILON {
            return 1.0;
        }
        (p - self.center).length() / self.radius
    }

    pub fn color_at(&self, p: Vec2) -> Color {
        blend_stops(self.from, self.to, self.offset_at(p))
    }
}

/// Padded interpolation between two stops; mirrors the fragment shaders.
pub fn blend_stops(from: ColorStop, to: ColorStop, t: f32) -> Color {
    let span = to.t - from.t;
    let u = if span.abs() <= f32::EPSILON {
        if t < from.t { 0.0 } else { 1.0 }
    } else {
        ((t - from.t) / span).clamp(0.0, 1.0)
    };
    from.color.lerp(to.color, u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radial_pads_outside_stops() {
        let glow = Color::gray(1.0, 0.12);
        let g = RadialGradient::new(
            Vec2::zero(),
            100.0,
            ColorStop::new(0.0, glow),
            ColorStop::new(0.55, Color::TRANSPARENT),
        );
        assert_eq!(g.color_at(Vec2::zero()), glow);
        assert_eq!(g.color_at(Vec2::new(80.0, 0.0)), Color::TRANSPARENT);
        let mid = g.color_at(Vec2::new(27.5, 0.0));
        assert!((mid.a - 0.06).abs() < 1e-5);
    }

    #[test]
    fn vignette_is_clear_inside_inner_stop() {
        let g = RadialGradient::new(
            Vec2::new(50.0, 50.0),
            50.0,
            ColorStop::new(0.55, Color::TRANSPARENT),
            ColorStop::new(1.0, Color::gray(0.0, 0.94)),
        );
        assert_eq!(g.color_at(Vec2::new(60.0, 50.0)).a, 0.0);
        assert!((g.color_at(Vec2::new(100.0, 50.0)).a - 0.94).abs() < 1e-6);
    }

    #[test]
    fn linear_offset_projects_on_axis() {
        let g = LinearGradient::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(1.0, Color::WHITE),
        );
        assert_eq!(g.offset_at(Vec2::new(5.0, 99.0)), 0.5);
        assert_eq!(g.color_at(Vec2::new(-5.0, 0.0)), Color::BLACK);
    }
}
