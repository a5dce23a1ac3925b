//! Capabilities shared by every primitive.
//!
//! Each concrete shape implements these traits once; [`GenericPrimitive`]
//! forwards to them by matching on its variant.
//!
//! [`GenericPrimitive`]: crate::GenericPrimitive

use lucid_math::{Interval, Normal3, Point3, Ray, Real, Transformable, Vec2};
use rand::Rng;

use crate::{Aabb, Intersection};

/// Ray intersection and the surface normal at a hit.
pub trait Intersectable {
    /// Intersect `ray` with the primitive, accepting only `t` strictly inside
    /// `range`. Degenerate configurations report [`Intersection::MISS`].
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection;

    /// Unit normal at the hit `isect` produced by `ray`.
    fn normal(&self, ray: &Ray, isect: &Intersection) -> Normal3;
}

/// Area sampling for direct lighting.
pub trait Sampleable {
    /// Map a uniform pair in `[0, 1)^2` to a point on the surface.
    fn sample(&self, u: Vec2) -> Point3;

    /// Surface area.
    fn area(&self) -> Real;

    /// Sample with a pair drawn from a caller-owned generator.
    fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        self.sample(Vec2::new(rng.gen(), rng.gen()))
    }
}

/// Spatial extent.
pub trait Boundable {
    /// Axis-aligned box enclosing the primitive.
    fn bound(&self) -> Aabb;

    /// A representative interior point.
    fn centroid(&self) -> Point3 {
        self.bound().centroid()
    }
}

/// Everything a scene needs from a shape.
pub trait Primitive: Intersectable + Sampleable + Boundable + Transformable {}

impl<T> Primitive for T where T: Intersectable + Sampleable + Boundable + Transformable {}
