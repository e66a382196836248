//! Layered trig noise that pushes mesh vertices along their normals.
//!
//! The WGSL vertex shader evaluates the same function on the GPU; this module
//! is the reference used by tests and by anything that needs displaced
//! positions on the CPU.

use glam::Vec3;

/// One noise octave: `n3(p * frequency + t * time_scale)`, weighted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NoiseLayer {
    pub frequency: f32,
    pub time_scale: f32,
    pub weight: f32,
}

/// Parameters of the displacement field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplacementParams {
    /// Scales elapsed seconds before the per-layer multipliers.
    pub time_rate: f32,
    pub layers: [NoiseLayer; 3],
    pub amplitude: f32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            time_rate: 0.6,
            layers: [
                NoiseLayer { frequency: 3.5, time_scale: 1.0, weight: 0.6 },
                NoiseLayer { frequency: 6.0, time_scale: -1.3, weight: 0.3 },
                NoiseLayer { frequency: 9.0, time_scale: 0.7, weight: 0.1 },
            ],
            amplitude: 0.45,
        }
    }
}

impl DisplacementParams {
    /// Upper bound of `|displacement|`: each `n3` lies in `[-1, 1]`.
    pub fn max_magnitude(&self) -> f32 {
        self.layers.iter().map(|l| l.weight.abs()).sum::<f32>() * self.amplitude.abs()
    }

    /// Signed offset along the normal at `p` and `time` seconds.
    pub fn displacement(&self, p: Vec3, time: f32) -> f32 {
        let t = time * self.time_rate;
        let sum: f32 = self
            .layers
            .iter()
            .map(|l| n3(p * l.frequency + Vec3::splat(t * l.time_scale)) * l.weight)
            .sum();
        sum * self.amplitude
    }

    /// `p` moved along `normal` by [`displacement`](Self::displacement).
    pub fn displace(&self, p: Vec3, normal: Vec3, time: f32) -> Vec3 {
        p + normal * self.displacement(p, time)
    }
}

/// `sin(x) * cos(y) * sin(z)`.
#[inline]
pub fn n3(p: Vec3) -> f32 {
    p.x.sin() * p.y.cos() * p.z.sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn origin_is_never_displaced() {
        let params = DisplacementParams::default();
        // n3 has sin(x) and sin(z) factors; at p = 0 every layer reduces to
        // sin(c) * cos(c) * sin(c) with c = t * time_scale.
        assert_eq!(params.displacement(Vec3::ZERO, 0.0), 0.0);
    }

    #[test]
    fn default_bound_is_amplitude() {
        let params = DisplacementParams::default();
        assert!((params.max_magnitude() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn matches_hand_computed_value() {
        let params = DisplacementParams::default();
        let p = Vec3::new(0.3, -0.7, 1.1);
        let time = 2.0f32;
        let t = time * 0.6;
        let d1 = n3(p * 3.5 + Vec3::splat(t));
        let d2 = n3(p * 6.0 - Vec3::splat(t * 1.3));
        let d3 = n3(p * 9.0 + Vec3::splat(t * 0.7));
        let expected = (d1 * 0.6 + d2 * 0.3 + d3 * 0.1) * 0.45;
        assert!((params.displacement(p, time) - expected).abs() < 1e-6);
    }

    #[test]
    fn displace_moves_along_normal_only() {
        let params = DisplacementParams::default();
        let p = Vec3::new(0.0, 1.6, 0.0);
        let n = Vec3::Y;
        let out = params.displace(p, n, 0.75);
        assert_eq!(out.x, 0.0);
        assert_eq!(out.z, 0.0);
    }

    proptest! {
        #[test]
        fn displacement_is_bounded(
            x in -10.0f32..10.0,
            y in -10.0f32..10.0,
            z in -10.0f32..10.0,
            time in 0.0f32..100_000.0,
        ) {
            let params = DisplacementParams::default();
            let d = params.displacement(Vec3::new(x, y, z), time);
            prop_assert!(d.abs() <= 0.45 + 1e-5);
        }

        #[test]
        fn displaced_distance_equals_displacement_for_unit_normals(
            theta in 0.0f32..std::f32::consts::TAU,
            phi in 0.01f32..3.13,
            time in 0.0f32..1000.0,
        ) {
            let params = DisplacementParams::default();
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let p = n * 1.6;
            let out = params.displace(p, n, time);
            prop_assert!(((out - p).length() - params.displacement(p, time).abs()).abs() < 1e-4);
        }
    }
}
