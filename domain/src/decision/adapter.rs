//! Threshold adaptation strategies
//!
//! After each run the orchestrator hands the adapter the run's outcome
//! statistics and the current thresholds, and takes back the thresholds for
//! the next run. Strategies are pluggable; whatever they propose is clamped
//! so `high > low` survives every adaptation.

use super::thresholds::DecisionThresholds;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome statistics from one decision pass, input to adaptation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcomes {
    /// Items accepted this run (direct + review-resolved)
    pub accepted: usize,
    /// Items rejected this run (direct + review-resolved)
    pub rejected: usize,
    /// Items that passed through the review band
    pub review_resolved: usize,
}

impl RunOutcomes {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }

    /// Fraction of items accepted, or `None` for an empty run
    pub fn accept_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.accepted as f64 / total as f64)
    }
}

/// Strategy for moving the thresholds between runs
///
/// Implementations may propose any adjustment; the returned thresholds are
/// always valid because proposals go through [`DecisionThresholds::clamped`].
/// A yield-driven or feedback controller can replace the baseline without
/// touching the engine or orchestrator.
pub trait ThresholdAdapter: Send + Sync {
    /// Produce the thresholds for the next run
    fn adapt(
        &mut self,
        current: &DecisionThresholds,
        outcomes: &RunOutcomes,
    ) -> DecisionThresholds;
}

/// Baseline adapter: independent bounded random jitter on each threshold.
///
/// Decouples short-term threshold movement from any single run's outcome.
/// A stand-in for a real controller, kept because it exercises the clamping
/// invariant continuously.
pub struct RandomPerturbationAdapter {
    /// Maximum absolute jitter applied per run to each threshold
    magnitude: f64,
}

impl RandomPerturbationAdapter {
    pub fn new(magnitude: f64) -> Self {
        Self {
            magnitude: magnitude.abs(),
        }
    }
}

impl Default for RandomPerturbationAdapter {
    /// Jitter of at most one score point per run, as in the reference pipeline
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ThresholdAdapter for RandomPerturbationAdapter {
    fn adapt(
        &mut self,
        current: &DecisionThresholds,
        _outcomes: &RunOutcomes,
    ) -> DecisionThresholds {
        let mut rng = rand::thread_rng();
        let high = current.high() + rng.gen_range(-self.magnitude..=self.magnitude);
        let low = current.low() + rng.gen_range(-self.magnitude..=self.magnitude);
        DecisionThresholds::clamped(high, low)
    }
}

/// Adapter that never moves the thresholds
pub struct FixedThresholdAdapter;

impl ThresholdAdapter for FixedThresholdAdapter {
    fn adapt(
        &mut self,
        current: &DecisionThresholds,
        _outcomes: &RunOutcomes,
    ) -> DecisionThresholds {
        *current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_survives_many_adaptations() {
        let mut adapter = RandomPerturbationAdapter::new(1.0);
        let mut thresholds = DecisionThresholds::new(80.0, 40.0).unwrap();
        let outcomes = RunOutcomes::default();

        for _ in 0..1000 {
            thresholds = adapter.adapt(&thresholds, &outcomes);
            assert!(thresholds.high() > thresholds.low());
            assert!((0.0..=100.0).contains(&thresholds.high()));
            assert!((0.0..=100.0).contains(&thresholds.low()));
        }
    }

    #[test]
    fn test_invariant_survives_adversarial_magnitude() {
        // Jitter large enough to cross the thresholds on almost every step
        let mut adapter = RandomPerturbationAdapter::new(500.0);
        let mut thresholds = DecisionThresholds::new(80.0, 40.0).unwrap();
        let outcomes = RunOutcomes::default();

        for _ in 0..200 {
            thresholds = adapter.adapt(&thresholds, &outcomes);
            assert!(thresholds.high() > thresholds.low());
        }
    }

    #[test]
    fn test_jitter_stays_bounded() {
        let mut adapter = RandomPerturbationAdapter::new(1.0);
        let current = DecisionThresholds::new(80.0, 40.0).unwrap();
        let next = adapter.adapt(&current, &RunOutcomes::default());

        assert!((next.high() - current.high()).abs() <= 1.0 + f64::EPSILON);
        assert!((next.low() - current.low()).abs() <= 1.0 + f64::EPSILON);
    }

    #[test]
    fn test_fixed_adapter_is_identity() {
        let mut adapter = FixedThresholdAdapter;
        let current = DecisionThresholds::new(80.0, 40.0).unwrap();
        assert_eq!(adapter.adapt(&current, &RunOutcomes::default()), current);
    }

    #[test]
    fn test_accept_rate() {
        let outcomes = RunOutcomes {
            accepted: 3,
            rejected: 1,
            review_resolved: 2,
        };
        assert_eq!(outcomes.accept_rate(), Some(0.75));
        assert_eq!(RunOutcomes::default().accept_rate(), None);
    }
}
