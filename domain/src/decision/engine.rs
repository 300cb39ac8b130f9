//! Three-way decision engine
//!
//! Partitions scored items into accepted and rejected sets using the two
//! thresholds, routing the middle band through a [`ReviewPolicy`]. One pass
//! is total and deterministic: every input item lands in exactly one set,
//! in input order, and repeating the pass with the same inputs and
//! thresholds yields the same partition.

use super::review_policy::ReviewPolicy;
use super::thresholds::DecisionThresholds;
use crate::evaluation::entities::ScoredItem;
use crate::item::entities::Item;
use serde::{Deserialize, Serialize};

/// Per-item decision state
///
/// `Review` is transient — it always resolves to accepted or rejected
/// within the same pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionOutcome {
    Accepted,
    Rejected,
    Review,
}

impl DecisionOutcome {
    /// Classify a score against the thresholds (pure transition rule)
    pub fn classify(score: f64, thresholds: &DecisionThresholds) -> Self {
        if score >= thresholds.high() {
            DecisionOutcome::Accepted
        } else if score < thresholds.low() {
            DecisionOutcome::Rejected
        } else {
            DecisionOutcome::Review
        }
    }
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionOutcome::Accepted => write!(f, "accepted"),
            DecisionOutcome::Rejected => write!(f, "rejected"),
            DecisionOutcome::Review => write!(f, "review"),
        }
    }
}

/// Result of one decision pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionPartition {
    /// Items accepted this pass, in input order
    pub accepted: Vec<Item>,
    /// Items rejected this pass, in input order
    pub rejected: Vec<Item>,
    /// How many items went through review before landing
    pub review_resolved: usize,
}

impl DecisionPartition {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// The three-way decision engine
///
/// Holds the review policy; thresholds are passed per call since they are
/// owned by the orchestrator and adapted between runs.
pub struct ThreeWayDecisionEngine {
    policy: Box<dyn ReviewPolicy>,
}

impl ThreeWayDecisionEngine {
    pub fn new(policy: Box<dyn ReviewPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Partition scored items against the thresholds.
    ///
    /// Transitions apply in input order; no item is dropped or duplicated.
    pub fn decide(
        &self,
        scored: &[ScoredItem],
        thresholds: &DecisionThresholds,
    ) -> DecisionPartition {
        let mut partition = DecisionPartition::default();

        for entry in scored {
            match DecisionOutcome::classify(entry.score(), thresholds) {
                DecisionOutcome::Accepted => partition.accepted.push(entry.item.clone()),
                DecisionOutcome::Rejected => partition.rejected.push(entry.item.clone()),
                DecisionOutcome::Review => {
                    partition.review_resolved += 1;
                    if self.policy.accept(&entry.item) {
                        partition.accepted.push(entry.item.clone());
                    } else {
                        partition.rejected.push(entry.item.clone());
                    }
                }
            }
        }

        partition
    }
}

impl Default for ThreeWayDecisionEngine {
    fn default() -> Self {
        Self::new(Box::new(super::review_policy::MarkerReviewPolicy::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::review_policy::MarkerReviewPolicy;
    use crate::evaluation::entities::{Evaluation, Provenance};
    use crate::item::entities::ItemKind;

    fn scored(content: &str, score: f64) -> ScoredItem {
        let item = Item::new(ItemKind::ShortAnswer, content, "answer");
        let eval = Evaluation::new(item.id.clone(), score, Provenance::New);
        ScoredItem::new(item, eval)
    }

    fn engine() -> ThreeWayDecisionEngine {
        ThreeWayDecisionEngine::new(Box::new(MarkerReviewPolicy::new("[placeholder]")))
    }

    #[test]
    fn test_classify_against_thresholds() {
        let t = DecisionThresholds::new(85.0, 50.0).unwrap();
        assert_eq!(
            DecisionOutcome::classify(90.0, &t),
            DecisionOutcome::Accepted
        );
        assert_eq!(
            DecisionOutcome::classify(30.0, &t),
            DecisionOutcome::Rejected
        );
        assert_eq!(DecisionOutcome::classify(60.0, &t), DecisionOutcome::Review);
        // Boundaries: high is inclusive, low is inclusive for review
        assert_eq!(
            DecisionOutcome::classify(85.0, &t),
            DecisionOutcome::Accepted
        );
        assert_eq!(DecisionOutcome::classify(50.0, &t), DecisionOutcome::Review);
    }

    #[test]
    fn test_reference_decisions() {
        let t = DecisionThresholds::new(85.0, 50.0).unwrap();
        let engine = engine();

        let inputs = vec![
            scored("direct accept", 90.0),
            scored("direct reject", 30.0),
            scored("review, clean content", 60.0),
            scored("review with [placeholder] marker", 60.0),
        ];
        let partition = engine.decide(&inputs, &t);

        let accepted: Vec<_> = partition.accepted.iter().map(|i| i.content.as_str()).collect();
        let rejected: Vec<_> = partition.rejected.iter().map(|i| i.content.as_str()).collect();

        assert_eq!(accepted, vec!["direct accept", "review, clean content"]);
        assert_eq!(
            rejected,
            vec!["direct reject", "review with [placeholder] marker"]
        );
        assert_eq!(partition.review_resolved, 2);
    }

    #[test]
    fn test_partition_is_total_and_exclusive() {
        // Randomized score/threshold pairs: every item lands exactly once
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let engine = engine();

        for _ in 0..200 {
            let high: f64 = rng.gen_range(1.0..=100.0);
            let low: f64 = rng.gen_range(0.0..high);
            let Ok(t) = DecisionThresholds::new(high, low) else {
                continue;
            };

            let inputs: Vec<ScoredItem> = (0..20)
                .map(|i| scored(&format!("item {i}"), rng.gen_range(0.0..=100.0)))
                .collect();

            let partition = engine.decide(&inputs, &t);
            assert_eq!(partition.total(), inputs.len());

            for entry in &inputs {
                let in_accepted = partition.accepted.iter().any(|i| i.id == entry.item.id);
                let in_rejected = partition.rejected.iter().any(|i| i.id == entry.item.id);
                assert!(in_accepted ^ in_rejected, "item must land in exactly one set");
            }
        }
    }

    #[test]
    fn test_decide_is_idempotent() {
        let t = DecisionThresholds::new(70.0, 30.0).unwrap();
        let engine = engine();
        let inputs = vec![
            scored("a", 95.0),
            scored("b", 50.0),
            scored("c", 10.0),
            scored("d [placeholder]", 45.0),
        ];

        let first = engine.decide(&inputs, &t);
        let second = engine.decide(&inputs, &t);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_empty_partition() {
        let t = DecisionThresholds::default();
        let partition = engine().decide(&[], &t);
        assert_eq!(partition.total(), 0);
        assert_eq!(partition.review_resolved, 0);
    }
}
