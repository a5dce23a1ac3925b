//! Closest-hit traversal and occlusion over flat primitive collections.
//!
//! Collections are scanned linearly: runtime lists (`[P]`, `Vec<P>`,
//! `[P; N]`) and fixed heterogeneous tuples share one traversal loop through
//! [`PrimitiveSet`].

use lucid_math::{Interval, Normal3, Ray};

use crate::{Intersectable, Intersection};

/// An indexable collection of intersectable primitives.
pub trait PrimitiveSet {
    /// Number of primitives.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Intersect the primitive at `index`; out-of-range indices miss.
    fn intersect_at(&self, index: usize, ray: &Ray, range: Interval) -> Intersection;

    /// Normal of the primitive at `index` for a hit it produced.
    fn normal_at(&self, index: usize, ray: &Ray, isect: &Intersection) -> Option<Normal3>;

    /// Closest hit inside `range` and the index of the primitive hit.
    ///
    /// The range shrinks to the best `t` found so far, so the first primitive
    /// in iteration order wins exact ties.
    fn traverse(&self, ray: &Ray, range: Interval) -> Option<(usize, Intersection)> {
        let mut range = range;
        let mut closest = None;
        for index in 0..self.len() {
            let isect = self.intersect_at(index, ray, range);
            if isect.is_hit() {
                range = range.with_max(isect.t);
                closest = Some((index, isect));
            }
        }
        closest
    }

    /// Whether anything blocks `ray` inside `range`. Stops at the first hit.
    fn occlusion(&self, ray: &Ray, range: Interval) -> bool {
        (0..self.len()).any(|index| self.intersect_at(index, ray, range).is_hit())
    }
}

impl<P: Intersectable> PrimitiveSet for [P] {
    #[inline]
    fn len(&self) -> usize {
        <[P]>::len(self)
    }

    #[inline]
    fn intersect_at(&self, index: usize, ray: &Ray, range: Interval) -> Intersection {
        self.get(index)
            .map_or(Intersection::MISS, |prim| prim.intersect(ray, range))
    }

    #[inline]
    fn normal_at(&self, index: usize, ray: &Ray, isect: &Intersection) -> Option<Normal3> {
        self.get(index).map(|prim| prim.normal(ray, isect))
    }
}

/// Forward to another set.
macro_rules! forward_set {
    ($($target:ty => [$($generics:tt)*]),+ $(,)?) => {
        $(
            impl<$($generics)*> PrimitiveSet for $target {
                #[inline]
                fn len(&self) -> usize {
                    self.as_slice().len()
                }

                #[inline]
                fn intersect_at(&self, index: usize, ray: &Ray, range: Interval) -> Intersection {
                    self.as_slice().intersect_at(index, ray, range)
                }

                #[inline]
                fn normal_at(&self, index: usize, ray: &Ray, isect: &Intersection) -> Option<Normal3> {
                    self.as_slice().normal_at(index, ray, isect)
                }
            }
        )+
    };
}

forward_set! {
    Vec<P> => [P: Intersectable],
    [P; N] => [P: Intersectable, const N: usize],
}

impl<S: PrimitiveSet + ?Sized> PrimitiveSet for &S {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn intersect_at(&self, index: usize, ray: &Ray, range: Interval) -> Intersection {
        (**self).intersect_at(index, ray, range)
    }

    #[inline]
    fn normal_at(&self, index: usize, ray: &Ray, isect: &Intersection) -> Option<Normal3> {
        (**self).normal_at(index, ray, isect)
    }
}

/// Fixed tuples of distinct primitive types, indexed by field position.
macro_rules! tuple_set {
    ($len:expr => $($name:ident $idx:tt),+) => {
        impl<$($name: Intersectable),+> PrimitiveSet for ($($name,)+) {
            #[inline]
            fn len(&self) -> usize {
                $len
            }

            #[inline]
            fn intersect_at(&self, index: usize, ray: &Ray, range: Interval) -> Intersection {
                match index {
                    $($idx => self.$idx.intersect(ray, range),)+
                    _ => Intersection::MISS,
                }
            }

            #[inline]
            fn normal_at(&self, index: usize, ray: &Ray, isect: &Intersection) -> Option<Normal3> {
                match index {
                    $($idx => Some(self.$idx.normal(ray, isect)),)+
                    _ => None,
                }
            }
        }
    };
}

tuple_set!(1 => A 0);
tuple_set!(2 => A 0, B 1);
tuple_set!(3 => A 0, B 1, C 2);
tuple_set!(4 => A 0, B 1, C 2, D 3);
tuple_set!(5 => A 0, B 1, C 2, D 3, E 4);
tuple_set!(6 => A 0, B 1, C 2, D 3, E 4, F 5);
tuple_set!(7 => A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_set!(8 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aabb, Disk, GenericPrimitive, Plane, Quad, Sphere, Triangle};
    use lucid_math::{Point3, Real, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut StdRng, extent: Real) -> Point3 {
        Point3::new(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        )
    }

    fn random_scene(rng: &mut StdRng) -> Vec<GenericPrimitive> {
        let mut prims = Vec::new();
        for _ in 0..4 {
            prims.push(Sphere::new(random_point(rng, 4.0), rng.gen_range(0.2..1.0)).into());
            prims.push(Aabb::new(random_point(rng, 4.0), random_point(rng, 4.0)).into());
            prims.push(Triangle::new(random_point(rng, 4.0), random_point(rng, 4.0), random_point(rng, 4.0)).into());
            prims.push(Disk::new(random_point(rng, 4.0), random_point(rng, 1.0).to_vec3(), 0.8).into());
        }
        prims.push(
            Quad::new(
                Point3::new(-5.0, -5.0, -5.0),
                Point3::new(-5.0, 5.0, -5.0),
                Point3::new(5.0, 5.0, -5.0),
                Point3::new(5.0, -5.0, -5.0),
            )
            .into(),
        );
        prims
    }

    fn random_ray(rng: &mut StdRng) -> Ray {
        let origin = random_point(rng, 6.0);
        Ray::new(origin, random_point(rng, 1.0).to_vec3() + Vec3::splat(1e-3))
    }

    #[test]
    fn test_traverse_picks_closest() {
        let prims: Vec<GenericPrimitive> = vec![
            Sphere::new(Point3::new(0.0, 0.0, 10.0), 1.0).into(),
            Sphere::new(Point3::new(0.0, 0.0, 4.0), 1.0).into(),
            Plane::new(Point3::new(0.0, 0.0, 20.0), Normal3::NEG_Z).into(),
        ];
        let ray = Ray::new(Point3::ORIGIN, Normal3::Z);

        let (index, isect) = prims.traverse(&ray, Interval::FORWARD).unwrap();
        assert_eq!(index, 1);
        assert!((isect.t - 3.0).abs() < 1e-5);
        let n = prims.normal_at(index, &ray, &isect).unwrap();
        assert!((n.to_vec3() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_traverse_miss_and_empty() {
        let prims = [Sphere::new(Point3::new(0.0, 5.0, 0.0), 1.0)];
        let ray = Ray::new(Point3::ORIGIN, Normal3::Z);
        assert!(prims.traverse(&ray, Interval::FORWARD).is_none());
        assert!(!prims.occlusion(&ray, Interval::FORWARD));

        let empty: Vec<Sphere> = Vec::new();
        assert!(empty.is_empty());
        assert!(empty.traverse(&ray, Interval::FORWARD).is_none());
        assert!(!empty.occlusion(&ray, Interval::FORWARD));
    }

    #[test]
    fn test_first_wins_exact_tie() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 2.0), Normal3::NEG_Z);
        let prims = [plane, plane, plane];
        let ray = Ray::new(Point3::ORIGIN, Normal3::Z);
        let (index, _) = prims.traverse(&ray, Interval::FORWARD).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_occlusion_respects_range() {
        let prims = vec![Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0)];
        let ray = Ray::new(Point3::ORIGIN, Normal3::Z);

        assert!(prims.occlusion(&ray, Interval::new(1e-4, 10.0)));
        assert!(!prims.occlusion(&ray, Interval::new(1e-4, 3.5)));
    }

    #[test]
    fn test_occlusion_matches_traverse() {
        let mut rng = StdRng::seed_from_u64(101);
        for _ in 0..50 {
            let prims = random_scene(&mut rng);
            for _ in 0..200 {
                let ray = random_ray(&mut rng);
                let max = rng.gen_range(0.5..20.0);
                let range = Interval::new(1e-4, max);
                assert_eq!(prims.occlusion(&ray, range), prims.traverse(&ray, range).is_some());
            }
        }
    }

    #[test]
    fn test_traverse_matches_brute_force_minimum() {
        let mut rng = StdRng::seed_from_u64(103);
        let prims = random_scene(&mut rng);
        for _ in 0..2000 {
            let ray = random_ray(&mut rng);
            let best = prims
                .iter()
                .map(|p| p.intersect(&ray, Interval::FORWARD))
                .fold(Intersection::MISS, Intersection::closer);

            match prims.traverse(&ray, Interval::FORWARD) {
                Some((index, isect)) => {
                    assert!(best.is_hit());
                    assert_eq!(isect.t, best.t);
                    assert_eq!(prims[index].intersect(&ray, Interval::FORWARD).t, best.t);
                }
                None => assert!(!best.is_hit()),
            }
        }
    }

    #[test]
    fn test_tuple_matches_list() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 3.0), 0.5);
        let disk = Disk::new(Point3::new(0.0, 0.0, 1.0), Normal3::NEG_Z, 0.25);
        let bbox = Aabb::new(Point3::new(-2.0, -2.0, 6.0), Point3::new(2.0, 2.0, 7.0));

        let tuple = (sphere, disk, bbox);
        let list: Vec<GenericPrimitive> = vec![sphere.into(), disk.into(), bbox.into()];
        assert_eq!(tuple.len(), 3);

        let mut rng = StdRng::seed_from_u64(107);
        for _ in 0..1000 {
            let target = Point3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 10.0);
            let (ray, _) = Ray::between(Point3::ORIGIN, target);
            let a = tuple.traverse(&ray, Interval::FORWARD);
            let b = list.traverse(&ray, Interval::FORWARD);
            assert_eq!(a.map(|(i, isect)| (i, isect.t)), b.map(|(i, isect)| (i, isect.t)));
            assert_eq!(tuple.occlusion(&ray, Interval::FORWARD), a.is_some());
        }

        assert!(!tuple.intersect_at(3, &Ray::default(), Interval::FORWARD).is_hit());
        assert!(tuple.normal_at(3, &Ray::default(), &Intersection::MISS).is_none());
    }
}
