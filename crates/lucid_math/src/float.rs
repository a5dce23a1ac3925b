//! Floating point comparisons and small scalar solvers.

use crate::{Real, Vec3};

/// Compare two scalars within `ulp` units in the last place.
///
/// The machine epsilon is scaled to the magnitude of the operands. Values
/// whose difference is below the smallest positive normal compare equal too,
/// so comparisons against zero behave.
#[inline]
pub fn almost_equal(a: Real, b: Real, ulp: u32) -> bool {
    let diff = (a - b).abs();
    diff <= Real::EPSILON * (a + b).abs() * ulp as Real || diff < Real::MIN_POSITIVE
}

/// Componentwise [`almost_equal`].
pub fn almost_equal_vec3(a: Vec3, b: Vec3, ulp: u32) -> bool {
    almost_equal(a.x, b.x, ulp) && almost_equal(a.y, b.y, ulp) && almost_equal(a.z, b.z, ulp)
}

/// True when `x` is too small to divide by.
#[inline]
pub fn is_near_zero(x: Real) -> bool {
    x.abs() < Real::MIN_POSITIVE
}

/// Real roots of `a x^2 + b x + c`, smallest first.
///
/// Uses the `q = -(b + sign(b) sqrt(D)) / 2` form so neither root suffers
/// cancellation. A zero discriminant returns the tangent root twice.
pub fn quadratic(a: Real, b: Real, c: Real) -> Option<(Real, Real)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || is_near_zero(a) {
        return None;
    }

    let q = -0.5 * (b + discriminant.sqrt().copysign(b));
    if q == 0.0 {
        // b == 0 and c == 0: double root at the origin
        return Some((0.0, 0.0));
    }

    let x0 = q / a;
    let x1 = c / q;
    Some(if x0 <= x1 { (x0, x1) } else { (x1, x0) })
}

/// Fold `[0, 1)` onto itself after a branch at one half.
///
/// Lets a random coordinate that already chose between two halves be reused
/// as a fresh uniform value.
#[inline]
pub fn resample(x: Real) -> Real {
    let y = 2.0 * x;
    if y >= 1.0 {
        y - 1.0
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_almost_equal() {
        assert!(almost_equal(1.0, 1.0, 1));
        assert!(almost_equal(1.0, 1.0 + Real::EPSILON, 2));
        assert!(!almost_equal(1.0, 1.001, 10));
        assert!(almost_equal(0.0, 0.0, 1));
        assert!(almost_equal(0.0, Real::MIN_POSITIVE * 0.5, 1));
    }

    #[test]
    fn test_is_near_zero() {
        assert!(is_near_zero(0.0));
        assert!(is_near_zero(-0.0));
        assert!(!is_near_zero(1e-20));
    }

    #[test]
    fn test_quadratic_two_roots() {
        // (x - 9)(x - 11) = x^2 - 20x + 99
        let (x0, x1) = quadratic(1.0, -20.0, 99.0).unwrap();
        assert!((x0 - 9.0).abs() < 1e-4);
        assert!((x1 - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_quadratic_tangent_and_none() {
        let (x0, x1) = quadratic(1.0, -2.0, 1.0).unwrap();
        assert_eq!(x0, 1.0);
        assert_eq!(x1, 1.0);

        assert!(quadratic(1.0, 0.0, 1.0).is_none());
        assert_eq!(quadratic(1.0, 0.0, 0.0), Some((0.0, 0.0)));
    }

    #[test]
    fn test_quadratic_mixed_signs() {
        // (x + 1)(x - 1)
        let (x0, x1) = quadratic(1.0, 0.0, -1.0).unwrap();
        assert!((x0 + 1.0).abs() < 1e-6);
        assert!((x1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_resample() {
        assert_eq!(resample(0.0), 0.0);
        assert_eq!(resample(0.25), 0.5);
        assert_eq!(resample(0.5), 0.0);
        assert_eq!(resample(0.75), 0.5);
        assert!(resample(0.999) < 1.0);
    }
}
