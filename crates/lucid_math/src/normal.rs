use std::ops::{Index, Mul, Neg};

use crate::{Mat3, Real, Vec3};

/// A unit length direction.
///
/// Every constructor normalizes its input, so a `Normal3` is always unit
/// length (or NaN for a zero input, which callers must not construct).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Normal3(Vec3);

impl Normal3 {
    pub const X: Normal3 = Normal3(Vec3::X);
    pub const Y: Normal3 = Normal3(Vec3::Y);
    pub const Z: Normal3 = Normal3(Vec3::Z);
    pub const NEG_X: Normal3 = Normal3(Vec3::NEG_X);
    pub const NEG_Y: Normal3 = Normal3(Vec3::NEG_Y);
    pub const NEG_Z: Normal3 = Normal3(Vec3::NEG_Z);

    #[inline]
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self::from_vec3(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self(v.normalize())
    }

    #[inline]
    pub fn x(&self) -> Real {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> Real {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> Real {
        self.0.z
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }

    #[inline]
    pub fn dot(&self, v: Vec3) -> Real {
        self.0.dot(v)
    }

    #[inline]
    pub fn cross(&self, v: Vec3) -> Vec3 {
        self.0.cross(v)
    }

    /// Flip the normal so it lies in the hemisphere opposite to `incoming`.
    #[inline]
    pub fn face_forward(self, incoming: Vec3) -> Normal3 {
        if self.0.dot(incoming) > 0.0 {
            -self
        } else {
            self
        }
    }

    /// Two unit tangents completing a right-handed orthonormal frame.
    ///
    /// Branchless construction from Duff et al., "Building an Orthonormal
    /// Basis, Revisited" (2017).
    pub fn basis(&self) -> (Normal3, Normal3) {
        let Vec3 { x, y, z } = self.0;
        let sign = (1.0 as Real).copysign(z);
        let a = -1.0 / (sign + z);
        let b = x * y * a;
        (
            Normal3(Vec3::new(1.0 + sign * x * x * a, sign * b, -sign * x)),
            Normal3(Vec3::new(b, sign + y * y * a, -y)),
        )
    }

    /// Local to world rotation whose columns are the basis and the normal.
    pub fn basis_matrix(&self) -> Mat3 {
        let (tangent, bitangent) = self.basis();
        Mat3::from_cols(tangent.0, bitangent.0, self.0)
    }
}

impl From<Vec3> for Normal3 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v)
    }
}

impl From<Normal3> for Vec3 {
    #[inline]
    fn from(n: Normal3) -> Self {
        n.0
    }
}

impl Neg for Normal3 {
    type Output = Normal3;

    #[inline]
    fn neg(self) -> Normal3 {
        Normal3(-self.0)
    }
}

impl Mul<Real> for Normal3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Real) -> Vec3 {
        self.0 * rhs
    }
}

impl Index<usize> for Normal3 {
    type Output = Real;

    #[inline]
    fn index(&self, axis: usize) -> &Real {
        &self.0[axis]
    }
}
