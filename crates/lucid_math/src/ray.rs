use crate::{Normal3, Point3, Real};

/// A ray with an origin point and a unit direction.
///
/// Points along the ray are `origin + t * direction`; because the direction
/// is unit length, `t` is the euclidean distance from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Normal3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Point3, direction: impl Into<Normal3>) -> Self {
        Self {
            origin,
            direction: direction.into(),
        }
    }

    /// The ray leaving `from` toward `to`, and the distance between them.
    pub fn between(from: Point3, to: Point3) -> (Self, Real) {
        let delta = to - from;
        let distance = delta.length();
        (Self::new(from, Normal3::from_vec3(delta)), distance)
    }

    /// Get the point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: Real) -> Point3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Point3::ORIGIN,
            direction: Normal3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(ray.direction, Normal3::Z);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Normal3::X);

        assert_eq!(ray.at(0.0), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Point3::new(3.5, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_between() {
        let a = Point3::new(0.0, 1.0, 0.0);
        let b = Point3::new(0.0, 1.0, -4.0);
        let (ray, distance) = Ray::between(a, b);

        assert_eq!(distance, 4.0);
        assert_eq!(ray.direction, Normal3::NEG_Z);
        assert_eq!(ray.at(distance), b);
    }
}
