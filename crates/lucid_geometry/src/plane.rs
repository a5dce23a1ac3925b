//! Infinite plane primitive.

use lucid_math::{almost_equal, is_near_zero, Interval, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2, Vec3};

use crate::{Aabb, Boundable, Intersectable, Intersection, Sampleable};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub position: Point3,
    pub normal: Normal3,
}

impl Plane {
    pub fn new(position: Point3, normal: impl Into<Normal3>) -> Self {
        Self {
            position,
            normal: normal.into(),
        }
    }

    /// Ray parameter where `ray` crosses the plane, `None` when parallel.
    pub(crate) fn crossing(position: Point3, normal: Normal3, ray: &Ray) -> Option<Real> {
        let denom = normal.dot(ray.direction.to_vec3());
        if is_near_zero(denom) {
            return None;
        }
        Some(normal.dot(position - ray.origin) / denom)
    }
}

impl Intersectable for Plane {
    /// `uv` is the hit position in the plane's tangent frame, relative to
    /// `position`.
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        match Self::crossing(self.position, self.normal, ray) {
            Some(t) if range.surrounds(t) => {
                let local = ray.at(t) - self.position;
                let (tangent, bitangent) = self.normal.basis();
                Intersection::at(t, Vec2::new(tangent.dot(local), bitangent.dot(local)))
            }
            _ => Intersection::MISS,
        }
    }

    fn normal(&self, _ray: &Ray, _isect: &Intersection) -> Normal3 {
        self.normal
    }
}

impl Sampleable for Plane {
    /// An infinite plane has no uniform distribution; every sample is the
    /// anchor point.
    fn sample(&self, _u: Vec2) -> Point3 {
        self.position
    }

    fn area(&self) -> Real {
        Real::INFINITY
    }
}

impl Boundable for Plane {
    /// Unbounded, except flat along an axis the normal is aligned with.
    fn bound(&self) -> Aabb {
        let mut vmin = Vec3::splat(Real::NEG_INFINITY);
        let mut vmax = Vec3::splat(Real::INFINITY);
        for axis in 0..3 {
            if almost_equal(self.normal[axis].abs(), 1.0, 4) {
                vmin[axis] = self.position[axis];
                vmax[axis] = self.position[axis];
            }
        }
        Aabb::new(Point3::from(vmin), Point3::from(vmax))
    }

    fn centroid(&self) -> Point3 {
        self.position
    }
}

impl Transformable for Plane {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        Self {
            position: self.position.apply_transform(transform),
            normal: self.normal.apply_transform(transform),
        }
    }
}
