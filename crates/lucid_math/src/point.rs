use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

use crate::{Real, Vec3};

/// A position in 3D space.
///
/// Points translate under transforms and only combine with vectors:
/// `Point3 - Point3` is a [`Vec3`], `Point3 + Vec3` is a `Point3`, and two
/// points cannot be added.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point3(Vec3);

impl Point3 {
    pub const ORIGIN: Point3 = Point3(Vec3::ZERO);

    #[inline]
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn splat(v: Real) -> Self {
        Self(Vec3::splat(v))
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

    /// Position vector relative to the origin.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }

    /// Componentwise minimum.
    #[inline]
    pub fn min(self, other: Point3) -> Point3 {
        Point3(self.0.min(other.0))
    }

    /// Componentwise maximum.
    #[inline]
    pub fn max(self, other: Point3) -> Point3 {
        Point3(self.0.max(other.0))
    }

    /// Componentwise interpolation: `self + (other - self) * weights`.
    #[inline]
    pub fn lerp(self, other: Point3, weights: Vec3) -> Point3 {
        self + (other - self) * weights
    }

    #[inline]
    pub fn distance(self, other: Point3) -> Real {
        (self - other).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Point3) -> Real {
        (self - other).length_squared()
    }

    /// Affine combination `a w0 + b w1 + c (1 - w0 - w1)`.
    #[inline]
    pub fn barycentric(a: Point3, b: Point3, c: Point3, w0: Real, w1: Real) -> Point3 {
        Point3(a.0 * w0 + b.0 * w1 + c.0 * (1.0 - w0 - w1))
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl From<Vec3> for Point3 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self(v)
    }
}

impl From<[Real; 3]> for Point3 {
    #[inline]
    fn from(v: [Real; 3]) -> Self {
        Self(Vec3::from(v))
    }
}

impl From<Point3> for Vec3 {
    #[inline]
    fn from(p: Point3) -> Self {
        p.0
    }
}

impl Sub for Point3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vec3 {
        self.0 - rhs.0
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vec3) -> Point3 {
        Point3(self.0 + rhs)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Point3 {
        Point3(self.0 - rhs)
    }
}

impl AddAssign<Vec3> for Point3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.0 += rhs;
    }
}

impl SubAssign<Vec3> for Point3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.0 -= rhs;
    }
}

impl Index<usize> for Point3 {
    type Output = Real;

    #[inline]
    fn index(&self, axis: usize) -> &Real {
        &self.0[axis]
    }
}
