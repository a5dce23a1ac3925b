//! Disk primitive: a plane clipped to a radius.

use lucid_math::consts::{PI, TAU};
use lucid_math::sampling::square_to_disk_concentric;
use lucid_math::{Interval, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2, Vec3};

use crate::plane::Plane;
use crate::{Aabb, Boundable, Intersectable, Intersection, Sampleable};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Disk {
    pub position: Point3,
    pub normal: Normal3,
    pub radius: Real,
}

impl Disk {
    pub fn new(position: Point3, normal: impl Into<Normal3>, radius: Real) -> Self {
        Self {
            position,
            normal: normal.into(),
            radius,
        }
    }
}

impl Intersectable for Disk {
    /// `uv` is `(rho / radius, phi / 2pi)` in the disk's tangent frame.
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        let Some(t) = Plane::crossing(self.position, self.normal, ray) else {
            return Intersection::MISS;
        };
        if !range.surrounds(t) {
            return Intersection::MISS;
        }

        let local = ray.at(t) - self.position;
        if local.length_squared() > self.radius * self.radius {
            return Intersection::MISS;
        }

        let (tangent, bitangent) = self.normal.basis();
        let (x, y) = (tangent.dot(local), bitangent.dot(local));
        let mut phi = y.atan2(x);
        if phi < 0.0 {
            phi += TAU;
        }
        Intersection::at(t, Vec2::new(x.hypot(y) / self.radius, phi / TAU))
    }

    fn normal(&self, _ray: &Ray, _isect: &Intersection) -> Normal3 {
        self.normal
    }
}

impl Sampleable for Disk {
    fn sample(&self, u: Vec2) -> Point3 {
        let p = square_to_disk_concentric(u) * self.radius;
        self.position + self.normal.basis_matrix() * Vec3::new(p.x, p.y, 0.0)
    }

    fn area(&self) -> Real {
        PI * self.radius * self.radius
    }
}

impl Boundable for Disk {
    fn bound(&self) -> Aabb {
        let n = self.normal;
        let extent = |axis: usize| self.radius * (1.0 - n[axis] * n[axis]).max(0.0).sqrt();
        let half = Vec3::new(extent(0), extent(1), extent(2));
        Aabb::new(self.position - half, self.position + half)
    }

    fn centroid(&self) -> Point3 {
        self.position
    }
}

impl Transformable for Disk {
    /// The radius follows the in-plane area scale of the matrix.
    fn apply_transform(&self, transform: &Mat4) -> Self {
        let (tangent, bitangent) = self.normal.basis();
        let area_scale = tangent
            .to_vec3()
            .apply_transform(transform)
            .cross(bitangent.to_vec3().apply_transform(transform))
            .length();

        Self {
            position: self.position.apply_transform(transform),
            normal: self.normal.apply_transform(transform),
            radius: self.radius * area_scale.sqrt(),
        }
    }
}
