//! Bilinear patch primitive.
//!
//! Intersection follows Lagae and Dutre, "An Efficient Ray-Quadrilateral
//! Intersection Test" (2005): a triangle test against the `v00` corner, a
//! second one against the `v11` corner to reject hits past the far
//! diagonal, then recovery of the bilinear coordinates from the patch
//! coefficients.

use lucid_math::sampling::square_to_triangle;
use lucid_math::{is_near_zero, resample, Interval, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2, Vec3};

use crate::{Aabb, Boundable, Intersectable, Intersection, Sampleable};

/// Quad with corners in patch order: `v00 -> v10` and `v00 -> v01` are the
/// two edge directions, `v11` is diagonal from `v00`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub v00: Point3,
    pub v01: Point3,
    pub v11: Point3,
    pub v10: Point3,
}

impl Quad {
    pub fn new(v00: Point3, v01: Point3, v11: Point3, v10: Point3) -> Self {
        Self { v00, v01, v11, v10 }
    }

    /// Corners in patch order.
    #[inline]
    pub fn vertices(&self) -> [Point3; 4] {
        [self.v00, self.v01, self.v11, self.v10]
    }

    /// Bilinear interpolation of the corners.
    pub fn point_at(&self, uv: Vec2) -> Point3 {
        let bottom = self.v00.lerp(self.v10, Vec3::splat(uv.x));
        let top = self.v01.lerp(self.v11, Vec3::splat(uv.x));
        bottom.lerp(top, Vec3::splat(uv.y))
    }

    /// Bilinear coefficients `(a11, b11)` of the far corner, computed in the
    /// projection plane of the dominant normal axis.
    fn far_corner_coefficients(e01: Vec3, e03: Vec3, e02: Vec3) -> (Real, Real) {
        let n = e01.cross(e03);
        let an = n.abs();
        if an.x >= an.y && an.x >= an.z {
            (
                (e02.y * e03.z - e02.z * e03.y) / n.x,
                (e01.y * e02.z - e01.z * e02.y) / n.x,
            )
        } else if an.y >= an.x && an.y >= an.z {
            (
                (e02.z * e03.x - e02.x * e03.z) / n.y,
                (e01.z * e02.x - e01.x * e02.z) / n.y,
            )
        } else {
            (
                (e02.x * e03.y - e02.y * e03.x) / n.z,
                (e01.x * e02.y - e01.y * e02.x) / n.z,
            )
        }
    }
}

impl Intersectable for Quad {
    /// `uv` holds the bilinear coordinates along `v00 -> v10` and
    /// `v00 -> v01`.
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        let d = ray.direction.to_vec3();

        let e01 = self.v10 - self.v00;
        let e03 = self.v01 - self.v00;
        let p = d.cross(e03);
        let det = e01.dot(p);
        if is_near_zero(det) {
            return Intersection::MISS;
        }

        let tv = ray.origin - self.v00;
        let alpha = tv.dot(p) / det;
        if alpha < 0.0 {
            return Intersection::MISS;
        }

        let q = tv.cross(e01);
        let beta = d.dot(q) / det;
        if beta < 0.0 {
            return Intersection::MISS;
        }

        if alpha + beta > 1.0 {
            // Past the v10-v01 diagonal: test the triangle at the v11 corner
            let e23 = self.v01 - self.v11;
            let e21 = self.v10 - self.v11;
            let p2 = d.cross(e21);
            let det2 = e23.dot(p2);
            if is_near_zero(det2) {
                return Intersection::MISS;
            }

            let tv2 = ray.origin - self.v11;
            let alpha2 = tv2.dot(p2) / det2;
            if alpha2 < 0.0 {
                return Intersection::MISS;
            }
            let beta2 = d.dot(tv2.cross(e23)) / det2;
            if beta2 < 0.0 {
                return Intersection::MISS;
            }
        }

        let t = e03.dot(q) / det;
        if !range.surrounds(t) {
            return Intersection::MISS;
        }

        let e02 = self.v11 - self.v00;
        let (a11, b11) = Self::far_corner_coefficients(e01, e03, e02);

        // Linear in u, linear in v, or the full quadratic, depending on
        // which coefficient degenerates.
        let (u, v) = if is_near_zero(a11 - 1.0) {
            let u = alpha;
            let v = if is_near_zero(b11 - 1.0) {
                beta
            } else {
                beta / (u * (b11 - 1.0) + 1.0)
            };
            (u, v)
        } else if is_near_zero(b11 - 1.0) {
            let v = beta;
            (alpha / (v * (a11 - 1.0) + 1.0), v)
        } else {
            let a = -(b11 - 1.0);
            let b = alpha * (b11 - 1.0) - beta * (a11 - 1.0) - 1.0;
            let c = alpha;
            let delta = (b * b - 4.0 * a * c).max(0.0);
            let qq = -0.5 * (b + delta.sqrt().copysign(b));
            let mut u = qq / a;
            if !(0.0..=1.0).contains(&u) {
                u = c / qq;
            }
            (u, beta / (u * (b11 - 1.0) + 1.0))
        };

        Intersection::at(t, Vec2::new(u, v))
    }

    fn normal(&self, _ray: &Ray, _isect: &Intersection) -> Normal3 {
        Normal3::from_vec3((self.v10 - self.v00).cross(self.v01 - self.v00))
    }
}

impl Sampleable for Quad {
    /// Splits on the diagonal `v00 -> v11`: the first coordinate picks the
    /// triangle through `v01` or `v10` and is then reused for the warp.
    fn sample(&self, u: Vec2) -> Point3 {
        let corner = if u.x > 0.5 { self.v01 } else { self.v10 };
        let w = square_to_triangle(Vec2::new(resample(u.x), u.y));
        Point3::barycentric(self.v00, self.v11, corner, w.x, w.y)
    }

    /// Sum of the two triangles either side of the `v00 -> v11` diagonal.
    fn area(&self) -> Real {
        let diagonal = self.v11 - self.v00;
        let lower = diagonal.cross(self.v10 - self.v00).length();
        let upper = diagonal.cross(self.v01 - self.v00).length();
        0.5 * (lower + upper)
    }
}

impl Boundable for Quad {
    fn bound(&self) -> Aabb {
        Aabb::new(self.v00, self.v11).expand(self.v01).expand(self.v10)
    }
}

impl Transformable for Quad {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        let [v00, v01, v11, v10] = self.vertices().map(|v| v.apply_transform(transform));
        Self { v00, v01, v11, v10 }
    }
}
