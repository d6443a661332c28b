//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix builders the scene
//! graph and the render dispatch need. Matrices are column-major and use the
//! right-handed, Y-up convention with an OpenGL-style clip space.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Extension trait for Mat4 with the builders used by transforms and cameras
pub trait Mat4Ext {
    /// Rotation about the X axis, angle in degrees
    fn rotation_x_deg(degrees: f32) -> Mat4;

    /// Rotation about the Y axis, angle in degrees
    fn rotation_y_deg(degrees: f32) -> Mat4;

    /// Rotation about the Z axis, angle in degrees
    fn rotation_z_deg(degrees: f32) -> Mat4;

    /// Right-handed perspective projection mapping depth to [-1, 1]
    fn perspective_gl(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed orthographic projection with near/far of -1 and 1
    fn orthographic_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Column `index` truncated to three components
    fn column3(&self, index: usize) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn rotation_x_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(degrees))
    }

    fn rotation_y_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees))
    }

    fn rotation_z_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(degrees))
    }

    fn perspective_gl(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // nalgebra's constructor already follows the OpenGL depth convention
        Mat4::new_perspective(aspect, utils::deg_to_rad(fov_y_degrees), near, far)
    }

    fn orthographic_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, -1.0, 1.0)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn column3(&self, index: usize) -> Vec3 {
        Vec3::new(self[(0, index)], self[(1, index)], self[(2, index)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_rotations_match_radian_constructors() {
        let y = Mat4::rotation_y_deg(90.0);
        let rotated = y.transform_vector(&Vec3::new(1.0, 0.0, 0.0));

        // Right-handed Y-up: +X rotated 90 degrees about Y points to -Z
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_column3_reads_translation() {
        let m = Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0));
        assert_relative_eq!(m.column3(3), Vec3::new(4.0, 5.0, 6.0));
        assert_relative_eq!(m.column3(0), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        let eye_in_view = view.transform_point(&Point3::from(eye));

        assert_relative_eq!(eye_in_view.coords, Vec3::zeros(), epsilon = 1e-6);
    }
}
