use crate::Real;

/// Admissible range of the ray parameter `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Real,
    pub max: Real,
}

impl Interval {
    /// Everything strictly in front of the ray origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: Real::INFINITY,
    };

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: Real::INFINITY,
        max: Real::NEG_INFINITY,
    };

    /// Create a new interval given min and max values.
    pub fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    /// Interval from two bounds in either order.
    pub fn sorted(a: Real, b: Real) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> Real {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: Real) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: Real) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: Real) -> Interval {
        Interval::new(self.min, max)
    }

    /// Same upper bound, new lower bound.
    pub fn with_min(&self, min: Real) -> Interval {
        Interval::new(min, self.max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FORWARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // endpoints excluded
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));
    }

    #[test]
    fn test_forward_interval() {
        let forward = Interval::default();
        assert_eq!(forward, Interval::FORWARD);
        assert!(forward.surrounds(1e-3));
        assert!(forward.surrounds(1e30));
        assert!(!forward.surrounds(0.0));
        assert!(!forward.surrounds(-1.0));
        assert!(!forward.surrounds(Real::INFINITY));
    }

    #[test]
    fn test_interval_sorted_and_narrowed() {
        let interval = Interval::sorted(5.0, -1.0);
        assert_eq!(interval.min, -1.0);
        assert_eq!(interval.max, 5.0);
        assert_eq!(interval.size(), 6.0);

        let narrowed = interval.with_max(2.0).with_min(0.5);
        assert_eq!(narrowed, Interval::new(0.5, 2.0));
    }

    #[test]
    fn test_interval_empty() {
        let empty = Interval::EMPTY;
        assert!(empty.min > empty.max);
        assert!(!empty.contains(0.0));
        assert!(!empty.surrounds(0.0));
    }
}
