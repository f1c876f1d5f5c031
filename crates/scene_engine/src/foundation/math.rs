//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix builders the scene
//! graph, cameras and picking need. All matrices follow OpenGL conventions:
//! right-handed, Y-up, clip-space depth in [-1, 1], column vectors.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Smallest magnitude treated as non-zero by the matrix builders.
pub const EPSILON: f32 = 1e-6;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with the builders used by cameras and the scene graph
pub trait Mat4Ext: Sized {
    /// Compose a translation × rotation × scale matrix
    fn from_trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Self;

    /// Orthographic projection over `[left, right] × [bottom, top] × [near, far]`
    ///
    /// Returns `None` when any of the three extents is zero.
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Option<Self>;

    /// Perspective projection with a vertical field of view in radians
    ///
    /// Returns `None` for a zero aspect ratio, a zero field of view or
    /// coincident clip planes.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Option<Self>;

    /// Right-handed look-at view matrix
    ///
    /// When `eye` and `target` coincide there is no view direction; the result
    /// degrades to a pure inverse translation.
    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Self;

    /// Translation column of an affine matrix
    fn translation_part(&self) -> Vec3;

    /// Transform a point, dividing by the resulting `w` when it is non-zero
    fn project_point(&self, point: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn from_trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Self {
        Mat4::new_translation(position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(scale)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Option<Self> {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        if width.abs() < EPSILON || height.abs() < EPSILON || depth.abs() < EPSILON {
            return None;
        }

        let mut result = Mat4::identity();
        result[(0, 0)] = 2.0 / width;
        result[(1, 1)] = 2.0 / height;
        result[(2, 2)] = -2.0 / depth;
        result[(0, 3)] = -(right + left) / width;
        result[(1, 3)] = -(top + bottom) / height;
        result[(2, 3)] = -(far + near) / depth;
        Some(result)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Option<Self> {
        let tan_half_fovy = (fov_y * 0.5).tan();
        let depth = far - near;
        if aspect.abs() < EPSILON || tan_half_fovy.abs() < EPSILON || depth.abs() < EPSILON {
            return None;
        }

        // P = [1/(a·t)  0    0             0            ]
        //     [0        1/t  0             0            ]
        //     [0        0    -(f+n)/(f-n)  -2fn/(f-n)   ]
        //     [0        0    -1            0            ]
        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / depth;
        result[(2, 3)] = -(2.0 * far * near) / depth;
        result[(3, 2)] = -1.0;
        Some(result)
    }

    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Self {
        if (target - eye).norm_squared() < EPSILON * EPSILON {
            return Mat4::new_translation(&-eye);
        }
        Mat4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)])
    }

    fn project_point(&self, point: &Vec3) -> Vec3 {
        let h = self * Vec4::new(point.x, point.y, point.z, 1.0);
        if h.w.abs() > f32::EPSILON {
            Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
        } else {
            h.xyz()
        }
    }
}
