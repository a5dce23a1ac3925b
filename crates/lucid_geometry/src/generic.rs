//! Closed sum type over every primitive shape.

use lucid_math::{Interval, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2};

use crate::{Aabb, Boundable, Disk, Intersectable, Intersection, Plane, Quad, Sampleable, Sphere, Triangle};

/// Any primitive, for scenes that mix shapes in one list.
///
/// Operations forward to the held shape with a single `match`; adding a
/// shape means adding a variant and one arm to `dispatch!`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GenericPrimitive {
    Sphere(Sphere),
    Plane(Plane),
    Disk(Disk),
    Triangle(Triangle),
    Quad(Quad),
    Aabb(Aabb),
}

/// Evaluate `$body` with `$prim` bound to the held shape.
macro_rules! dispatch {
    ($self:expr, $prim:ident => $body:expr) => {
        match $self {
            GenericPrimitive::Sphere($prim) => $body,
            GenericPrimitive::Plane($prim) => $body,
            GenericPrimitive::Disk($prim) => $body,
            GenericPrimitive::Triangle($prim) => $body,
            GenericPrimitive::Quad($prim) => $body,
            GenericPrimitive::Aabb($prim) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for GenericPrimitive {
                fn from(prim: $variant) -> Self {
                    GenericPrimitive::$variant(prim)
                }
            }
        )+
    };
}

impl_from!(Sphere, Plane, Disk, Triangle, Quad, Aabb);

impl GenericPrimitive {
    /// Lowercase shape name, as used in scene files and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenericPrimitive::Sphere(_) => "sphere",
            GenericPrimitive::Plane(_) => "plane",
            GenericPrimitive::Disk(_) => "disk",
            GenericPrimitive::Triangle(_) => "triangle",
            GenericPrimitive::Quad(_) => "quad",
            GenericPrimitive::Aabb(_) => "box",
        }
    }
}

impl Intersectable for GenericPrimitive {
    #[inline]
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        dispatch!(self, p => p.intersect(ray, range))
    }

    #[inline]
    fn normal(&self, ray: &Ray, isect: &Intersection) -> Normal3 {
        dispatch!(self, p => p.normal(ray, isect))
    }
}

impl Sampleable for GenericPrimitive {
    fn sample(&self, u: Vec2) -> Point3 {
        dispatch!(self, p => p.sample(u))
    }

    fn area(&self) -> Real {
        dispatch!(self, p => p.area())
    }
}

impl Boundable for GenericPrimitive {
    fn bound(&self) -> Aabb {
        dispatch!(self, p => p.bound())
    }

    fn centroid(&self) -> Point3 {
        dispatch!(self, p => p.centroid())
    }
}

impl Transformable for GenericPrimitive {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        dispatch!(self, p => p.apply_transform(transform).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_math::Vec3;

    fn shapes() -> Vec<GenericPrimitive> {
        vec![
            Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0).into(),
            Plane::new(Point3::new(0.0, 0.0, 20.0), Normal3::NEG_Z).into(),
            Disk::new(Point3::new(0.0, 0.0, 3.0), Normal3::NEG_Z, 0.5).into(),
            Triangle::new(
                Point3::new(-1.0, -1.0, 2.0),
                Point3::new(0.0, 1.0, 2.0),
                Point3::new(1.0, -1.0, 2.0),
            )
            .into(),
            Quad::new(
                Point3::new(-1.0, -1.0, 1.0),
                Point3::new(1.0, -1.0, 1.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(-1.0, 1.0, 1.0),
            )
            .into(),
            Aabb::new(Point3::new(-1.0, -1.0, 7.0), Point3::new(1.0, 1.0, 8.0)).into(),
        ]
    }

    #[test]
    fn test_dispatch_matches_concrete() {
        let ray = Ray::new(Point3::ORIGIN, Normal3::Z);
        let expected = [4.0, 20.0, 3.0, 2.0, 1.0, 7.0];
        for (prim, t) in shapes().iter().zip(expected) {
            let isect = prim.intersect(&ray, Interval::FORWARD);
            assert!(isect.is_hit(), "{} missed", prim.kind());
            assert!((isect.t - t).abs() < 1e-5, "{} at {}", prim.kind(), isect.t);
            assert!(prim.normal(&ray, &isect).dot(Vec3::Z) < 0.0, "{} faces away", prim.kind());
        }
    }

    #[test]
    fn test_kind_names() {
        let kinds: Vec<_> = shapes().iter().map(GenericPrimitive::kind).collect();
        assert_eq!(kinds, ["sphere", "plane", "disk", "triangle", "quad", "box"]);
    }

    #[test]
    fn test_generic_transform_round_trip() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_rotation_y(0.3);
        for prim in shapes() {
            let back = prim.apply_transform(&t).apply_transform(&t.inverse());
            assert_eq!(back.kind(), prim.kind());
            let (a, b) = (prim.centroid(), back.centroid());
            assert!((a - b).length() < 1e-4, "{} drifted", prim.kind());
        }
    }

    #[test]
    fn test_generic_forwards_surface_queries() {
        let sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 2.0);
        let prim = GenericPrimitive::from(sphere);
        assert_eq!(prim.bound(), sphere.bound());
        assert_eq!(prim.centroid(), sphere.centroid());
        assert_eq!(prim.area(), sphere.area());
        let u = Vec2::new(0.25, 0.75);
        assert_eq!(prim.sample(u), sphere.sample(u));
    }
}
