//! Triangle primitive.

use lucid_math::sampling::square_to_triangle;
use lucid_math::{is_near_zero, Interval, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2, Vec3};

use crate::{Aabb, Boundable, Intersectable, Intersection, Sampleable};

/// Triangle with vertices in winding order; the winding fixes the sign of
/// the normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub v0: Point3,
    pub v1: Point3,
    pub v2: Point3,
}

impl Triangle {
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        Self { v0, v1, v2 }
    }

    #[inline]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    #[inline]
    fn edges(&self) -> (Vec3, Vec3) {
        (self.v1 - self.v0, self.v2 - self.v0)
    }
}

impl Intersectable for Triangle {
    /// Moller-Trumbore. Both faces are hit; `uv` holds the barycentric
    /// weights of `v1` and `v2`.
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        let d = ray.direction.to_vec3();
        let (e1, e2) = self.edges();

        let p = d.cross(e2);
        let det = e1.dot(p);
        if is_near_zero(det) {
            return Intersection::MISS;
        }
        let inv_det = 1.0 / det;

        let s = ray.origin - self.v0;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return Intersection::MISS;
        }

        let q = s.cross(e1);
        let v = d.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return Intersection::MISS;
        }

        let t = e2.dot(q) * inv_det;
        Intersection::new(range.surrounds(t), t, Vec2::new(u, v))
    }

    fn normal(&self, _ray: &Ray, _isect: &Intersection) -> Normal3 {
        let (e1, e2) = self.edges();
        Normal3::from_vec3(e1.cross(e2))
    }
}

impl Sampleable for Triangle {
    fn sample(&self, u: Vec2) -> Point3 {
        let w = square_to_triangle(u);
        Point3::barycentric(self.v0, self.v1, self.v2, w.x, w.y)
    }

    fn area(&self) -> Real {
        let (e1, e2) = self.edges();
        0.5 * e1.cross(e2).length()
    }
}

impl Boundable for Triangle {
    fn bound(&self) -> Aabb {
        Aabb::new(self.v0, self.v1).expand(self.v2)
    }
}

impl Transformable for Triangle {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        Self {
            v0: self.v0.apply_transform(transform),
            v1: self.v1.apply_transform(transform),
            v2: self.v2.apply_transform(transform),
        }
    }
}
