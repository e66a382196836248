//! Camera, projection and mesh transform for the hero scene.

use glam::{Mat4, Vec3};

/// Perspective projection whose aspect follows the hero surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub const FOV_Y_DEGREES: f32 = 55.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y_degrees: Self::FOV_Y_DEGREES,
            aspect,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Right-handed, depth in `[0, 1]`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Distance of the camera from the origin along +Z.
pub const CAMERA_Z: f32 = 4.0;

/// View matrix of a camera at `(0, 0, CAMERA_Z)` looking down -Z.
pub fn view_matrix() -> Mat4 {
    let eye = Vec3::new(0.0, 0.0, CAMERA_Z);
    Mat4::look_at_rh(eye, eye - Vec3::Z, Vec3::Y)
}

/// Position and Euler rotation of the mesh. Rotation order is X then Y then Z
/// applied as `Rx * Ry * Rz`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshTransform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self { position: Vec3::new(0.6, 0.0, 0.0), rotation: Vec3::ZERO }
    }
}

impl MeshTransform {
    /// Per-frame spin in radians.
    pub const SPIN_X: f32 = 0.0012;
    pub const SPIN_Y: f32 = 0.0025;

    pub fn advance(&mut self) {
        self.rotation.y += Self::SPIN_Y;
        self.rotation.x += Self::SPIN_X;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn aspect_update_keeps_other_parameters() {
        let mut p = Projection::new(800.0 / 600.0);
        p.set_aspect(1920.0 / 1080.0);
        assert_eq!(p.aspect, 1920.0 / 1080.0);
        assert_eq!(p.fov_y_degrees, 55.0);
        assert_eq!(p.near, 0.1);
        assert_eq!(p.far, 1000.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let clip = Projection::new(1.5).matrix() * view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn mesh_sits_right_of_center() {
        let m = Projection::new(1.0).matrix() * view_matrix() * MeshTransform::default().matrix();
        let clip = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.x / clip.w > 0.0);
    }

    #[test]
    fn advance_spins_by_fixed_steps() {
        let mut t = MeshTransform::default();
        for _ in 0..10 {
            t.advance();
        }
        assert!((t.rotation.y - 0.025).abs() < 1e-6);
        assert!((t.rotation.x - 0.012).abs() < 1e-6);
        assert_eq!(t.rotation.z, 0.0);
        assert_eq!(t.position, Vec3::new(0.6, 0.0, 0.0));
    }

    #[test]
    fn rotation_applies_y_before_x() {
        let t = MeshTransform {
            position: Vec3::ZERO,
            rotation: Vec3::new(std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2, 0.0),
        };
        // Ry(90) takes +X to -Z, then Rx(90) takes -Z to +Y.
        let out = t.matrix().transform_point3(Vec3::X);
        assert!((out - Vec3::Y).length() < 1e-5, "{out:?}");
    }
}
