//! Confidence scores.

use std::fmt;

/// A confidence score in the range [0.0, 1.0].
///
/// Values outside the range are clamped and NaN becomes zero, so a
/// `Confidence` can always be compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Confidence::ZERO;
        }
        Confidence(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Strictly greater than `floor`.
    pub fn exceeds(&self, floor: f64) -> bool {
        self.0 > floor
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_clamps_into_the_unit_range() {
        assert_eq!(Confidence::new(1.0000001).value(), 1.0);
        assert_eq!(Confidence::new(-0.5).value(), 0.0);
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
        assert_eq!(Confidence::new(0.25).value(), 0.25);
    }

    #[test]
    fn exceeds_is_strict() {
        assert!(Confidence::new(0.001).exceeds(0.0001));
        assert!(!Confidence::new(0.0001).exceeds(0.0001));
        assert!(!Confidence::ZERO.exceeds(0.0));
    }
}
