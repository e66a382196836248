//! Animated flowing paths behind the landing page.
//!
//! Two mirrored fans of 36 curves each, laid out in a 696 x 316 design space
//! and scaled to cover the page. A lit segment travels along every curve;
//! its length and offset breathe over a per-path period of 20 to 30 seconds.

use folio_engine::coords::{Rect, Vec2};
use folio_engine::paint::Color;
use folio_engine::scene::{DrawList, ZIndex};

const PATHS_PER_FAN: usize = 36;
const DESIGN_SIZE: Vec2 = Vec2::new(696.0, 316.0);
/// Dots sampled along each curve.
const SAMPLES: usize = 96;

#[derive(Debug, Clone, PartialEq)]
struct FlowPath {
    /// Two cubic segments sharing `points[3]`.
    points: [Vec2; 7],
    stroke_width: f32,
    opacity: f32,
    period: f32,
}

impl FlowPath {
    fn new(index: usize, position: f32) -> Self {
        let i = index as f32;
        let shift = i * 5.0 * position;
        let p = |x: f32, y: f32| Vec2::new(x - shift, y);
        let start = p(-380.0, -(189.0 + i * 6.0));
        let end = p(684.0, 875.0 - i * 6.0);
        Self {
            points: [
                start,
                start,
                p(-312.0, 216.0 - i * 6.0),
                p(152.0, 343.0 - i * 6.0),
                p(616.0, 470.0 - i * 6.0),
                end,
                end,
            ],
            stroke_width: 0.5 + i * 0.03,
            opacity: 0.1 + i * 0.03,
            period: 20.0 + 10.0 * unit_hash(index as u32 ^ position.to_bits()),
        }
    }

    /// Point at `s` in `[0, 1]`; each cubic covers half the range.
    fn point_at(&self, s: f32) -> Vec2 {
        let s = s.clamp(0.0, 1.0);
        let (seg, u) = if s < 0.5 { (0, s * 2.0) } else { (3, s * 2.0 - 1.0) };
        let [a, b, c, d] = [
            self.points[seg],
            self.points[seg + 1],
            self.points[seg + 2],
            self.points[seg + 3],
        ];
        let v = 1.0 - u;
        a * (v * v * v) + b * (3.0 * v * v * u) + c * (3.0 * v * u * u) + d * (u * u * u)
    }

    /// Visible window `(offset, length)` at `time` seconds.
    fn window(&self, time: f32) -> (f32, f32) {
        let phase = (time / self.period).rem_euclid(1.0);
        let tri = 1.0 - (2.0 * phase - 1.0).abs();
        (tri, 0.3 + 0.7 * tri)
    }

    /// Brightness multiplier at `time`, between 0.6 and 1.0.
    fn pulse(&self, time: f32) -> f32 {
        let (_, len) = self.window(time);
        0.6 + 0.4 * ((len - 0.3) / 0.7)
    }
}

/// Deterministic value in `[0, 1)`.
fn unit_hash(mut x: u32) -> f32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    (x >> 8) as f32 / (1u32 << 24) as f32
}

/// True when `s` lies in the window starting at `offset`, wrapping at 1.
fn in_window(s: f32, offset: f32, length: f32) -> bool {
    (s - offset).rem_euclid(1.0) < length
}

/// The landing page background.
#[derive(Debug, Clone)]
pub struct FlowingPaths {
    paths: Vec<FlowPath>,
}

impl Default for FlowingPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowingPaths {
    pub fn new() -> Self {
        let paths = [1.0f32, -1.0]
            .into_iter()
            .flat_map(|position| (0..PATHS_PER_FAN).map(move |i| FlowPath::new(i, position)))
            .collect();
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Pushes the lit part of every path, drawn as dots, in `color`.
    pub fn paint(&self, list: &mut DrawList, area: Rect, time: f32, color: Color, z: ZIndex) {
        if area.is_empty() {
            return;
        }
        // Cover: scale to the larger ratio and center.
        let scale = (area.width() / DESIGN_SIZE.x).max(area.height() / DESIGN_SIZE.y);
        let offset = area.center() - DESIGN_SIZE * (0.5 * scale);

        list.push_clip(area);
        for path in &self.paths {
            let (start, length) = path.window(time);
            let alpha = path.opacity * path.pulse(time);
            let dot = color.with_opacity(alpha);
            let radius = (path.stroke_width * scale * 0.5).max(0.35);
            for k in 0..SAMPLES {
                let s = k as f32 / (SAMPLES - 1) as f32;
                if !in_window(s, start, length) {
                    continue;
                }
                let p = offset + path.point_at(s) * scale;
                list.push_solid_circle(z, p, radius, dot);
            }
        }
        list.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_fans_of_36() {
        let bg = FlowingPaths::new();
        assert_eq!(bg.len(), 72);
    }

    #[test]
    fn curves_start_and_end_at_their_anchors() {
        let path = FlowPath::new(3, 1.0);
        assert_eq!(path.point_at(0.0), Vec2::new(-380.0 - 15.0, -(189.0 + 18.0)));
        let end = path.point_at(1.0);
        assert!((end.x - (684.0 - 15.0)).abs() < 1e-3);
        assert!((end.y - (875.0 - 18.0)).abs() < 1e-3);
        assert_eq!(path.point_at(0.5), Vec2::new(152.0 - 15.0, 343.0 - 18.0));
    }

    #[test]
    fn mirrored_fan_shifts_the_other_way() {
        let a = FlowPath::new(10, 1.0);
        let b = FlowPath::new(10, -1.0);
        assert_eq!(b.points[0].x - a.points[0].x, 100.0);
    }

    #[test]
    fn periods_stay_in_range() {
        for path in &FlowingPaths::new().paths {
            assert!((20.0..=30.0).contains(&path.period), "{}", path.period);
        }
    }

    #[test]
    fn window_breathes_between_short_and_full() {
        let path = FlowPath::new(0, 1.0);
        let (o0, l0) = path.window(0.0);
        assert_eq!((o0, l0), (0.0, 0.3));
        let (o_mid, l_mid) = path.window(path.period * 0.5);
        assert!((o_mid - 1.0).abs() < 1e-5 && (l_mid - 1.0).abs() < 1e-5);
    }

    #[test]
    fn window_wraps_past_one() {
        assert!(in_window(0.05, 0.9, 0.3));
        assert!(!in_window(0.5, 0.9, 0.3));
        assert!(in_window(0.95, 0.9, 0.3));
    }

    #[test]
    fn paint_is_clipped_to_area_and_non_empty() {
        let bg = FlowingPaths::new();
        let mut list = DrawList::new();
        let area = Rect::new(0.0, 0.0, 1280.0, 800.0);
        bg.paint(&mut list, area, 3.0, Color::WHITE, ZIndex(0));
        assert!(!list.is_empty());
        assert!(list.items().iter().all(|item| item.clip_rect == Some(area)));
    }

    #[test]
    fn empty_area_paints_nothing() {
        let mut list = DrawList::new();
        FlowingPaths::new().paint(&mut list, Rect::default(), 1.0, Color::WHITE, ZIndex(0));
        assert!(list.is_empty());
    }

    proptest! {
        #[test]
        fn window_and_pulse_stay_bounded(index in 0usize..PATHS_PER_FAN, time in 0.0f32..100_000.0) {
            let path = FlowPath::new(index, -1.0);
            let (offset, length) = path.window(time);
            prop_assert!((0.0..=1.0).contains(&offset));
            prop_assert!((0.3 - 1e-5..=1.0 + 1e-5).contains(&length));
            let pulse = path.pulse(time);
            prop_assert!((0.6 - 1e-5..=1.0 + 1e-5).contains(&pulse));
        }
    }
}
