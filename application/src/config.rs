//! Application-level pipeline settings
//!
//! Serialization-format-neutral; the infrastructure layer maps file/env
//! configuration onto this and the composition root injects it.

use examforge_domain::{DecisionThresholds, Model};

/// Tunable parameters for a pipeline instance
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Model for task understanding, generation, and applicability checks
    pub generator: Model,
    /// Independent, typically stronger model for scoring
    pub evaluator: Model,
    /// Passages fetched per retrieval query
    pub retrieval_k: usize,
    /// Starting thresholds; adapted after every run
    pub thresholds: DecisionThresholds,
    /// Disqualifying content marker for the default review policy
    pub review_marker: String,
    /// Maximum per-run threshold jitter for the baseline adapter
    pub jitter: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            generator: Model::default_generator(),
            evaluator: Model::default_evaluator(),
            retrieval_k: 5,
            thresholds: DecisionThresholds::default(),
            review_marker: "[placeholder]".to_string(),
            jitter: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let settings = PipelineSettings::default();
        assert!(settings.retrieval_k > 0);
        assert!(settings.thresholds.high() > settings.thresholds.low());
        assert_ne!(settings.generator, settings.evaluator);
    }
}
