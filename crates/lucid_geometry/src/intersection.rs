//! The result of a ray/primitive query.

use lucid_math::{Point3, Ray, Real, Vec2};

/// Outcome of intersecting a ray with a primitive.
///
/// A miss always carries `t = +inf`, so reducing a list of intersections by
/// smallest `t` ignores misses without a separate check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Whether the ray hit the primitive inside the admissible range
    pub hit: bool,
    /// Ray parameter of the hit
    pub t: Real,
    /// Shape specific surface coordinates (barycentric, bilinear, polar)
    pub uv: Vec2,
}

impl Intersection {
    pub const MISS: Intersection = Intersection {
        hit: false,
        t: Real::INFINITY,
        uv: Vec2::ZERO,
    };

    /// Build an intersection, forcing `t` to infinity on a miss.
    #[inline]
    pub fn new(hit: bool, t: Real, uv: Vec2) -> Self {
        if hit {
            Self { hit, t, uv }
        } else {
            Self::MISS
        }
    }

    /// A hit at `t` with surface coordinates `uv`.
    #[inline]
    pub fn at(t: Real, uv: Vec2) -> Self {
        Self { hit: true, t, uv }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// The closer of two intersections; `self` wins exact ties.
    #[inline]
    pub fn closer(self, other: Intersection) -> Intersection {
        if other.t < self.t {
            other
        } else {
            self
        }
    }

    /// World position of the hit along `ray`.
    #[inline]
    pub fn point(&self, ray: &Ray) -> Point3 {
        ray.at(self.t)
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::MISS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_is_infinitely_far() {
        let miss = Intersection::new(false, 3.0, Vec2::new(0.5, 0.5));
        assert!(!miss.is_hit());
        assert_eq!(miss.t, Real::INFINITY);
        assert_eq!(miss, Intersection::default());
    }

    #[test]
    fn test_closer_prefers_smaller_t() {
        let near = Intersection::at(1.0, Vec2::ZERO);
        let far = Intersection::at(2.0, Vec2::ONE);

        assert_eq!(near.closer(far), near);
        assert_eq!(far.closer(near), near);
        assert_eq!(Intersection::MISS.closer(far), far);
        assert_eq!(far.closer(Intersection::MISS), far);
    }

    #[test]
    fn test_closer_keeps_first_on_tie() {
        let a = Intersection::at(1.0, Vec2::ZERO);
        let b = Intersection::at(1.0, Vec2::ONE);
        assert_eq!(a.closer(b).uv, Vec2::ZERO);
    }

    #[test]
    fn test_point_along_ray() {
        use lucid_math::Normal3;

        let ray = Ray::new(Point3::ORIGIN, Normal3::Y);
        let hit = Intersection::at(2.0, Vec2::ZERO);
        assert_eq!(hit.point(&ray), Point3::new(0.0, 2.0, 0.0));
    }
}
