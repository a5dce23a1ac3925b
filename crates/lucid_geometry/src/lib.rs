//! Lucid geometry - ray traversal and intersection core.
//!
//! Six primitives ([`Sphere`], [`Plane`], [`Disk`], [`Triangle`], [`Quad`],
//! [`Aabb`]) implement three small capabilities:
//!
//! - [`Intersectable`]: ray hit test and surface normal
//! - [`Sampleable`]: uniform area sampling for light sources
//! - [`Boundable`]: bounding box and centroid
//!
//! [`GenericPrimitive`] wraps them in one enum for heterogeneous scenes and
//! [`PrimitiveSet`] finds the closest hit (or any hit, for shadow rays) over
//! slices, vectors and fixed tuples.
//!
//! Every operation is pure. A miss is reported as [`Intersection::MISS`]
//! (`t = +inf`) rather than an error.

mod aabb;
mod disk;
mod generic;
mod intersection;
mod plane;
mod primitive;
mod quad;
mod sphere;
mod traverse;
mod triangle;

pub use aabb::Aabb;
pub use disk::Disk;
pub use generic::GenericPrimitive;
pub use intersection::Intersection;
pub use plane::Plane;
pub use primitive::{Boundable, Intersectable, Primitive, Sampleable};
pub use quad::Quad;
pub use sphere::Sphere;
pub use traverse::PrimitiveSet;
pub use triangle::Triangle;

pub use lucid_math::{Interval, Normal3, Point3, Ray, Transformable};
