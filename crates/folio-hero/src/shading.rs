//! Diffuse + rim lighting used by the wireframe fragment stage.

use glam::Vec3;

pub const DIFFUSE_WEIGHT: f32 = 0.55;
pub const RIM_WEIGHT: f32 = 1.4;
pub const RIM_POWER: f32 = 2.5;
/// Output alpha of every wire fragment.
pub const WIRE_ALPHA: f32 = 0.85;

/// Direction of the single key light (object space, normalized in `intensity`).
pub const LIGHT_DIR: Vec3 = Vec3::new(0.5, 0.8, 1.0);
/// View axis used for the rim term.
pub const VIEW_DIR: Vec3 = Vec3::Z;

/// Gray level for a surface normal. `normal` is normalized first; a zero
/// vector yields the pure rim term (1.4).
pub fn intensity(normal: Vec3) -> f32 {
    let n = normal.normalize_or_zero();
    let rim = (1.0 - n.dot(VIEW_DIR).max(0.0)).powf(RIM_POWER);
    let diff = n.dot(LIGHT_DIR.normalize()).max(0.0);
    DIFFUSE_WEIGHT * diff + RIM_WEIGHT * rim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_camera_has_no_rim() {
        let expected = DIFFUSE_WEIGHT * LIGHT_DIR.normalize().z;
        assert!((intensity(Vec3::Z) - expected).abs() < 1e-6);
    }

    #[test]
    fn silhouette_is_rim_dominated() {
        // Perpendicular to the view axis: rim term is 1.0.
        let n = Vec3::new(-1.0, 0.0, 0.0);
        assert!((intensity(n) - RIM_WEIGHT).abs() < 1e-6);
    }

    #[test]
    fn back_facing_clamps_both_terms() {
        let n = -LIGHT_DIR;
        assert!((intensity(n) - RIM_WEIGHT).abs() < 1e-6);
    }

    #[test]
    fn normal_length_does_not_matter() {
        let n = Vec3::new(0.2, 0.4, 0.9);
        assert!((intensity(n) - intensity(n * 7.0)).abs() < 1e-6);
    }
}
