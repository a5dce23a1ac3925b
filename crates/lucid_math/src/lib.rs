//! Lucid math - the linear-algebra substrate of the ray traversal core.
//!
//! Re-exports glam's vector and matrix types at the configured precision
//! (`f32` by default, `f64` with the `f64` feature) and adds the
//! affine-aware wrappers the geometry code relies on:
//!
//! - [`Point3`]: a position. Translates under transforms.
//! - [`Normal3`]: a unit direction. Transforms with the inverse transpose.
//! - [`Ray`]: origin point plus unit direction.
//! - [`Interval`]: the admissible `t` range of an intersection query.

pub use glam;

mod float;
mod interval;
mod normal;
mod point;
mod ray;
pub mod sampling;
mod transform;

pub use float::{almost_equal, almost_equal_vec3, is_near_zero, quadratic, resample};
pub use interval::Interval;
pub use normal::Normal3;
pub use point::Point3;
pub use ray::Ray;
pub use transform::{Mat4Ext, Transformable};

#[cfg(not(feature = "f64"))]
mod precision {
    /// Scalar type used uniformly by the renderer.
    pub type Real = f32;
    pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
    pub use std::f32::consts;
}

#[cfg(feature = "f64")]
mod precision {
    /// Scalar type used uniformly by the renderer.
    pub type Real = f64;
    pub use glam::{DMat3 as Mat3, DMat4 as Mat4, DQuat as Quat, DVec2 as Vec2, DVec3 as Vec3, DVec4 as Vec4};
    pub use std::f64::consts;
}

pub use precision::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_real_matches_vector_components() {
        let v = Vec3::splat(0.5);
        let r: Real = v.x;
        assert_eq!(r, 0.5);
        assert!(consts::PI.sin().abs() < 1e-6);
    }
}
