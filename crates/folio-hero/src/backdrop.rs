//! Glow and vignette layers painted under the hero mesh.

use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::{Color, ColorStop, RadialGradient};
use folio_engine::scene::{DrawList, ZIndex};

/// Where a backdrop circle is anchored in its area.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlowAnchor {
    Top,
    Center,
    Bottom,
}

impl GlowAnchor {
    fn point(self, area: Rect) -> Vec2 {
        let x = area.origin.x + area.width() * 0.5;
        match self {
            GlowAnchor::Top => Vec2::new(x, area.origin.y),
            GlowAnchor::Center => area.center(),
            GlowAnchor::Bottom => Vec2::new(x, area.max().y),
        }
    }
}

/// Circle anchored at `anchor` reaching the farthest corner of `area`.
pub fn circle_gradient(area: Rect, anchor: GlowAnchor, from: ColorStop, to: ColorStop) -> RadialGradient {
    let center = anchor.point(area);
    let corners = [
        area.origin,
        Vec2::new(area.max().x, area.origin.y),
        Vec2::new(area.origin.x, area.max().y),
        area.max(),
    ];
    let radius = corners
        .iter()
        .map(|&c| (c - center).length())
        .fold(0.0f32, f32::max);
    RadialGradient::new(center, radius, from, to)
}

/// The three layers in paint order: top glow, bottom glow, vignette.
pub fn backdrop_layers(area: Rect) -> [RadialGradient; 3] {
    [
        circle_gradient(
            area,
            GlowAnchor::Top,
            ColorStop::new(0.0, Color::gray(1.0, 0.12)),
            ColorStop::new(0.55, Color::TRANSPARENT),
        ),
        circle_gradient(
            area,
            GlowAnchor::Bottom,
            ColorStop::new(0.0, Color::gray(1.0, 0.08)),
            ColorStop::new(0.55, Color::TRANSPARENT),
        ),
        circle_gradient(
            area,
            GlowAnchor::Center,
            ColorStop::new(0.55, Color::TRANSPARENT),
            ColorStop::new(1.0, Color::gray(0.0, 0.94)),
        ),
    ]
}

/// Pushes the backdrop for `area` into `list`, bottom layer first.
pub fn paint_backdrop(list: &mut DrawList, area: Rect, z: ZIndex) {
    if area.is_empty() {
        return;
    }
    for layer in backdrop_layers(area) {
        list.push_rect(z, area, layer.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::paint::Paint;
    use folio_engine::scene::DrawCmd;

    #[test]
    fn top_glow_reaches_bottom_corners() {
        let area = Rect::new(0.0, 0.0, 800.0, 600.0);
        let [top, _, _] = backdrop_layers(area);
        assert_eq!(top.center, Vec2::new(400.0, 0.0));
        assert!((top.radius - 721.110_3).abs() < 1e-2);
    }

    #[test]
    fn glows_fade_out_by_55_percent() {
        let area = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let [top, bottom, _] = backdrop_layers(area);
        let far = Vec2::new(500.0, top.radius * 0.6);
        assert_eq!(top.color_at(far), Color::TRANSPARENT);
        assert!(bottom.color_at(bottom.center).a > 0.079);
    }

    #[test]
    fn vignette_is_clear_in_the_middle_and_dark_at_corners() {
        let area = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let [_, _, vignette] = backdrop_layers(area);
        assert_eq!(vignette.color_at(area.center()), Color::TRANSPARENT);
        let corner = vignette.color_at(Vec2::new(0.0, 0.0));
        assert!((corner.a - 0.94).abs() < 1e-4);
    }

    #[test]
    fn paints_three_full_area_layers() {
        let mut list = DrawList::new();
        let area = Rect::new(0.0, 0.0, 640.0, 480.0);
        paint_backdrop(&mut list, area, ZIndex(0));
        assert_eq!(list.len(), 3);
        for item in list.items() {
            match &item.cmd {
                DrawCmd::Rect(r) => {
                    assert_eq!(r.rect, area);
                    assert!(matches!(r.paint, Paint::RadialGradient(_)));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn empty_area_paints_nothing() {
        let mut list = DrawList::new();
        paint_backdrop(&mut list, Rect::new(0.0, 0.0, 0.0, 300.0), ZIndex(0));
        assert!(list.is_empty());
    }
}
