//! Axis-aligned box primitive.

use lucid_math::{resample, Interval, Mat4, Normal3, Point3, Ray, Real, Transformable, Vec2, Vec3};

use crate::{Boundable, Intersectable, Intersection, Sampleable};

/// Axis-aligned bounding box.
///
/// Also used as a primitive in its own right. Constructors sort their inputs
/// so `vmin <= vmax` holds componentwise.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    vmin: Point3,
    vmax: Point3,
}

impl Aabb {
    /// Create an AABB from two corner points in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            vmin: a.min(b),
            vmax: a.max(b),
        }
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| acc.expand(p)))
    }

    #[inline]
    pub fn vmin(&self) -> Point3 {
        self.vmin
    }

    #[inline]
    pub fn vmax(&self) -> Point3 {
        self.vmax
    }

    /// Corner selected per axis: `vmax` where `upper[axis]` is set.
    #[inline]
    fn corner(&self, upper: [bool; 3]) -> Point3 {
        Point3::new(
            if upper[0] { self.vmax.x() } else { self.vmin.x() },
            if upper[1] { self.vmax.y() } else { self.vmin.y() },
            if upper[2] { self.vmax.z() } else { self.vmin.z() },
        )
    }

    /// The eight corners.
    pub fn corners(&self) -> [Point3; 8] {
        [
            self.corner([false, false, false]),
            self.corner([true, false, false]),
            self.corner([false, true, false]),
            self.corner([true, true, false]),
            self.corner([false, false, true]),
            self.corner([true, false, true]),
            self.corner([false, true, true]),
            self.corner([true, true, true]),
        ]
    }

    pub fn diagonal(&self) -> Vec3 {
        self.vmax - self.vmin
    }

    /// Box grown to contain `p`.
    pub fn expand(&self, p: Point3) -> Aabb {
        Aabb {
            vmin: self.vmin.min(p),
            vmax: self.vmax.max(p),
        }
    }

    /// Box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            vmin: self.vmin.min(other.vmin),
            vmax: self.vmax.max(other.vmax),
        }
    }

    pub fn contains(&self, p: Point3) -> bool {
        (0..3).all(|axis| self.vmin[axis] <= p[axis] && p[axis] <= self.vmax[axis])
    }

    /// Outward normal of the face nearest to `p`.
    ///
    /// Faces are scanned axis by axis, min face before max face; the first
    /// nearest face wins ties at edges and corners.
    pub fn face_normal(&self, p: Point3) -> Normal3 {
        const FACES: [Normal3; 6] = [
            Normal3::NEG_X,
            Normal3::X,
            Normal3::NEG_Y,
            Normal3::Y,
            Normal3::NEG_Z,
            Normal3::Z,
        ];

        let mut best = 0;
        let mut best_distance = Real::INFINITY;
        for axis in 0..3 {
            for (side, bound) in [self.vmin[axis], self.vmax[axis]].into_iter().enumerate() {
                let distance = (p[axis] - bound).abs();
                if distance < best_distance {
                    best_distance = distance;
                    best = axis * 2 + side;
                }
            }
        }
        FACES[best]
    }
}

/// Rotate components right by `shift`: `out[i] = v[(i - shift) mod 3]`.
fn roll(v: Vec3, shift: usize) -> Vec3 {
    let s = shift % 3;
    Vec3::new(v[(3 - s) % 3], v[(4 - s) % 3], v[(5 - s) % 3])
}

impl Intersectable for Aabb {
    /// Slab test. Reports the entry distance, so a ray starting inside the
    /// box (negative entry) misses.
    fn intersect(&self, ray: &Ray, range: Interval) -> Intersection {
        let o = ray.origin;
        let inv_d = ray.direction.to_vec3().recip();

        let mut t_near = Real::NEG_INFINITY;
        let mut t_far = Real::INFINITY;
        for axis in 0..3 {
            let negative = inv_d[axis] < 0.0;
            let (near, far) = if negative {
                (self.vmax[axis], self.vmin[axis])
            } else {
                (self.vmin[axis], self.vmax[axis])
            };
            let t0 = (near - o[axis]) * inv_d[axis];
            let t1 = (far - o[axis]) * inv_d[axis];

            // A NaN slab (parallel ray on the slab plane) fails every
            // comparison and leaves the running interval unchanged.
            if t0 > t_far || t1 < t_near {
                return Intersection::MISS;
            }
            if t0 > t_near {
                t_near = t0;
            }
            if t1 < t_far {
                t_far = t1;
            }
        }

        let hit = !t_near.is_sign_negative() && range.surrounds(t_near);
        Intersection::new(hit, t_near, Vec2::ZERO)
    }

    fn normal(&self, ray: &Ray, isect: &Intersection) -> Normal3 {
        self.face_normal(isect.point(ray))
    }
}

impl Sampleable for Aabb {
    /// Picks a face from a value derived from both coordinates, then
    /// interpolates bilinearly inside it.
    fn sample(&self, u: Vec2) -> Point3 {
        let (s1, s2) = (u.x, u.y);
        let s3 = (2.0 * (s1 + s2)).fract();
        let shift = (300.0 * (s1 + s2 + s3).fract()) as usize;

        let (start, diagonal) = if s3 > 0.5 {
            (self.vmin, self.vmax - self.vmin)
        } else {
            (self.vmax, self.vmin - self.vmax)
        };
        let end = start + diagonal * roll(Vec3::new(1.0, 1.0, 0.0), shift);
        start.lerp(end, roll(Vec3::new(resample(s1), resample(s2), 0.0), shift))
    }

    fn area(&self) -> Real {
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }
}

impl Boundable for Aabb {
    fn bound(&self) -> Aabb {
        *self
    }

    fn centroid(&self) -> Point3 {
        Point3::from((self.vmin.to_vec3() + self.vmax.to_vec3()) * 0.5)
    }
}

impl Transformable for Aabb {
    /// Bounds all eight transformed corners.
    fn apply_transform(&self, transform: &Mat4) -> Self {
        let mut corners = self.corners().into_iter().map(|c| c.apply_transform(transform));
        let first = corners.next().unwrap_or(self.vmin);
        corners.fold(Aabb::new(first, first), |acc, p| acc.expand(p))
    }
}
