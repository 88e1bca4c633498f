//! Half-open numeric ranges used for randomized particle fields

use rand::Rng;

/// A half-open range `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    /// Create a new span
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A span that always yields `value`
    pub const fn fixed(value: f64) -> Self {
        Self { min: value, max: value }
    }

    /// Check that both ends are finite and ordered
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Whether `value` lies in `[min, max)`, or equals `min` for a degenerate span
    pub fn contains(&self, value: f64) -> bool {
        if self.min == self.max {
            return value == self.min;
        }
        value >= self.min && value < self.max
    }

    /// Draw a value uniformly from the span
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        let value = rng.gen_range(self.min..self.max);
        // Float rounding can land exactly on max
        if value < self.max { value } else { self.min }
    }

    /// Replace either end, keeping the other
    pub fn with_bounds(self, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.unwrap_or(self.min),
            max: max.unwrap_or(self.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn test_sample_stays_in_range() {
        let mut rng = seeded_rng(7);
        let span = Span::new(-20.0, 0.0);
        for _ in 0..10_000 {
            let v = span.sample(&mut rng);
            assert!(span.contains(v), "{v} outside {span:?}");
        }
    }

    #[test]
    fn test_degenerate_span() {
        let mut rng = seeded_rng(1);
        let span = Span::fixed(2.5);
        assert_eq!(span.sample(&mut rng), 2.5);
        assert!(span.contains(2.5));
        assert!(!span.contains(2.6));
    }

    #[test]
    fn test_contains_is_half_open() {
        let span = Span::new(2.0, 4.0);
        assert!(span.contains(2.0));
        assert!(span.contains(3.999));
        assert!(!span.contains(4.0));
        assert!(!span.contains(1.999));
    }

    #[test]
    fn test_validity() {
        assert!(Span::new(0.0, 1.0).is_valid());
        assert!(Span::fixed(1.0).is_valid());
        assert!(!Span::new(2.0, 1.0).is_valid());
        assert!(!Span::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_with_bounds() {
        let span = Span::new(14.0, 22.0).with_bounds(Some(10.0), None);
        assert_eq!(span, Span::new(10.0, 22.0));
    }
}
