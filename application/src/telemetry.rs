//! Run-level telemetry
//!
//! Recoverable degradations do not fail a run, so they must be visible some
//! other way. Every run returns these counters alongside its output; a
//! climbing fallback count across runs signals a degrading capability even
//! though individual runs keep succeeding.

use serde::{Deserialize, Serialize};

/// Counters accumulated over one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTelemetry {
    /// Generation responses that produced no usable item batch
    /// (schema/parse failures and transport failures alike)
    pub generation_parse_failures: usize,
    /// Items scored with the randomized fallback instead of a parsed score
    pub scoring_fallbacks: usize,
    /// Existing items retained by validation
    pub validated_kept: usize,
    /// Existing items discarded by validation
    pub validated_dropped: usize,
    /// Items accepted this run
    pub accepted: usize,
    /// Items rejected this run
    pub rejected: usize,
    /// Items that passed through the review band
    pub review_resolved: usize,
}

impl RunTelemetry {
    /// Whether any recoverable degradation happened this run
    pub fn degraded(&self) -> bool {
        self.generation_parse_failures > 0 || self.scoring_fallbacks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_flags() {
        assert!(!RunTelemetry::default().degraded());

        let telemetry = RunTelemetry {
            scoring_fallbacks: 1,
            ..Default::default()
        };
        assert!(telemetry.degraded());
    }
}
