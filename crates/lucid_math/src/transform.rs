// Transform application for points, normals, vectors and rays.
//
// Points use the full affine matrix (with a homogeneous divide for
// projective matrices), vectors only the upper 3x3, and normals the
// inverse transpose of the upper 3x3 so they stay perpendicular to
// transformed surfaces under non-uniform scale.

use crate::{almost_equal, Mat3, Mat4, Normal3, Point3, Ray, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Inverse transpose of the upper 3x3, the matrix that maps normals.
    fn normal_matrix(&self) -> Mat3;

    /// Transform a position (w=1), dividing by w unless it is ~0 or ~1.
    fn transform_point_homogeneous(&self, point: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(*self).inverse().transpose()
    }

    fn transform_point_homogeneous(&self, point: Vec3) -> Vec3 {
        let h = *self * point.extend(1.0);
        let w = h.w;
        if almost_equal(w, 0.0, 5) || almost_equal(w, 1.0, 5) {
            h.truncate()
        } else {
            h.truncate() / w
        }
    }
}

/// Values that can be mapped through a 4x4 transform.
///
/// Transforms are pure: the receiver is left untouched and a new value is
/// returned.
pub trait Transformable: Sized {
    fn apply_transform(&self, transform: &Mat4) -> Self;
}

impl Transformable for Vec3 {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        transform.transform_vector3(*self)
    }
}

impl Transformable for Point3 {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        Point3::from(transform.transform_point_homogeneous(self.to_vec3()))
    }
}

impl Transformable for Normal3 {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        Normal3::from_vec3(transform.normal_matrix() * self.to_vec3())
    }
}

impl Transformable for Ray {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        Ray::new(
            self.origin.apply_transform(transform),
            self.direction.apply_transform(transform),
        )
    }
}
