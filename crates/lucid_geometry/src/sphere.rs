//! Sphere primitive.

use lucid_math::consts::PI;
use lucid_math::sampling::square_to_sphere;
use lucid_math::{quadratic, Interval, Mat3, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2, Vec3};

use crate::{Aabb, Boundable, Intersectable, Intersection, Sampleable};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: Real,
}

impl Sphere {
    pub fn new(center: Point3, radius: Real) -> Self {
        Self { center, radius }
    }
}

impl Intersectable for Sphere {
    /// Takes the nearer root when it is admissible, otherwise the farther
    /// one, so a ray starting inside the sphere reports its exit point.
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        let d = ray.direction.to_vec3();
        let oc = ray.origin - self.center;

        let a = d.dot(d);
        let b = 2.0 * d.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let Some((t0, t1)) = quadratic(a, b, c) else {
            return Intersection::MISS;
        };

        if range.surrounds(t0) {
            Intersection::at(t0, Vec2::ZERO)
        } else if range.surrounds(t1) {
            Intersection::at(t1, Vec2::ZERO)
        } else {
            Intersection::MISS
        }
    }

    fn normal(&self, ray: &Ray, isect: &Intersection) -> Normal3 {
        Normal3::from_vec3(isect.point(ray) - self.center)
    }
}

impl Sampleable for Sphere {
    fn sample(&self, u: Vec2) -> Point3 {
        self.center + square_to_sphere(u) * self.radius
    }

    fn area(&self) -> Real {
        4.0 * PI * self.radius * self.radius
    }
}

impl Boundable for Sphere {
    fn bound(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(self.center - r, self.center + r)
    }

    fn centroid(&self) -> Point3 {
        self.center
    }
}

impl Transformable for Sphere {
    /// The radius follows the cube root of the volume scale. Exact for
    /// isotropic scale; an anisotropic matrix yields the sphere of equal
    /// volume since an ellipsoid is not representable.
    fn apply_transform(&self, transform: &Mat4) -> Self {
        let scale = Mat3::from_mat4(*transform).determinant().abs().cbrt();
        Self {
            center: self.center.apply_transform(transform),
            radius: self.radius * scale,
        }
    }
}
