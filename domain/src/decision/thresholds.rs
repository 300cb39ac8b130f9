//! Decision thresholds value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Smallest allowed separation between the two thresholds
const MIN_SEPARATION: f64 = 1.0;

/// The pair of score thresholds driving the three-way decision
///
/// Invariant: `high > low`, always. Construction validates; adjustment
/// clamps instead of failing, so the invariant can never be violated by an
/// adaptation step. Thresholds are mutated only between runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    high: f64,
    low: f64,
}

impl DecisionThresholds {
    /// Create thresholds, validating `high > low` and range `[0, 100]`
    pub fn new(high: f64, low: f64) -> Result<Self, DomainError> {
        if !(high > low) || !(0.0..=100.0).contains(&high) || !(0.0..=100.0).contains(&low) {
            return Err(DomainError::InvalidThresholds { high, low });
        }
        Ok(Self { high, low })
    }

    /// Build thresholds from a candidate pair, clamping into validity.
    ///
    /// `high` clamps to `[MIN_SEPARATION, 100]`, then `low` clamps below it.
    /// Used by adapters: a candidate adjustment that would cross the
    /// thresholds is clamped, never applied as-is and never an error.
    pub fn clamped(high: f64, low: f64) -> Self {
        let high = high.clamp(MIN_SEPARATION, 100.0);
        let low = low.clamp(0.0, high - MIN_SEPARATION);
        Self { high, low }
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }
}

impl Default for DecisionThresholds {
    /// Defaults matching the reference pipeline: accept at 80, reject below 40
    fn default() -> Self {
        Self {
            high: 80.0,
            low: 40.0,
        }
    }
}

impl std::fmt::Display for DecisionThresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "high={:.1}, low={:.1}", self.high, self.low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_construction() {
        let t = DecisionThresholds::new(85.0, 50.0).unwrap();
        assert_eq!(t.high(), 85.0);
        assert_eq!(t.low(), 50.0);
    }

    #[test]
    fn test_crossed_thresholds_rejected() {
        assert!(DecisionThresholds::new(40.0, 80.0).is_err());
        assert!(DecisionThresholds::new(50.0, 50.0).is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(DecisionThresholds::new(120.0, 50.0).is_err());
        assert!(DecisionThresholds::new(80.0, -5.0).is_err());
    }

    #[test]
    fn test_clamped_preserves_invariant() {
        let t = DecisionThresholds::clamped(30.0, 90.0);
        assert!(t.high() > t.low());

        let t = DecisionThresholds::clamped(150.0, -20.0);
        assert!(t.high() > t.low());
        assert!(t.high() <= 100.0);
        assert!(t.low() >= 0.0);
    }

    #[test]
    fn test_clamped_identity_for_valid_pair() {
        let t = DecisionThresholds::clamped(80.0, 40.0);
        assert_eq!(t.high(), 80.0);
        assert_eq!(t.low(), 40.0);
    }
}
