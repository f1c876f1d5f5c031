//! Picking geometry: bounding boxes and rays

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// The `[-0.5, 0.5]³` box of a unit cube mesh
    pub fn unit_cube() -> Self {
        Self::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5))
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Enclosing box of the eight corners after transformation
    ///
    /// Each corner is divided by its transformed `w`, so projective matrices
    /// are handled as well as affine ones.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut min = Vec3::repeat(f32::MAX);
        let mut max = Vec3::repeat(f32::MIN);
        for corner in self.corners() {
            let p = matrix.project_point(&corner);
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Self { min, max }
    }

    /// Slab test against a ray
    ///
    /// Returns the first non-negative `t` where the ray crosses the surface:
    /// the entry point, or the exit point when the ray starts inside the box.
    /// A box entirely behind the origin is a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(1.0 / ray.direction.x, 1.0 / ray.direction.y, 1.0 / ray.direction.z);
        let t0 = (self.min - ray.origin).component_mul(&inv_dir);
        let t1 = (self.max - ray.origin).component_mul(&inv_dir);

        let near = t0.inf(&t1);
        let far = t0.sup(&t1);

        let t_enter = near.x.max(near.y).max(near.z);
        let t_exit = far.x.min(far.y).min(far.z);

        if t_enter > t_exit || t_exit < 0.0 {
            None
        } else if t_enter >= 0.0 {
            Some(t_enter)
        } else {
            Some(t_exit)
        }
    }
}

/// Half-line used for 3D picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction, normally unit length
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray starting at `from` and heading towards `to`
    ///
    /// Returns `None` when the points coincide.
    pub fn through(from: Vec3, to: Vec3) -> Option<Self> {
        (to - from)
            .try_normalize(f32::EPSILON)
            .map(|direction| Self::new(from, direction))
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
