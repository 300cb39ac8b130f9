//! Domain layer for examforge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Three-Way Decision
//!
//! Scored items are partitioned by two thresholds instead of one:
//!
//! - **Accepted**: score at or above the high threshold
//! - **Rejected**: score below the low threshold
//! - **Review**: everything in between, resolved by a swappable
//!   [`ReviewPolicy`] so no item is ever silently dropped
//!
//! ## Banks
//!
//! Accepted and rejected items accumulate across runs in append-only
//! [`ItemBanks`]. Thresholds drift between runs via a [`ThresholdAdapter`],
//! never mid-run.

pub mod core;
pub mod decision;
pub mod evaluation;
pub mod item;
pub mod knowledge;
pub mod prompt;

// Re-export commonly used types
pub use self::core::{error::DomainError, model::Model};
pub use decision::{
    adapter::{FixedThresholdAdapter, RandomPerturbationAdapter, RunOutcomes, ThresholdAdapter},
    engine::{DecisionOutcome, DecisionPartition, ThreeWayDecisionEngine},
    review_policy::{AcceptAllReviewPolicy, MarkerReviewPolicy, ReviewPolicy},
    thresholds::DecisionThresholds,
};
pub use evaluation::{
    entities::{Evaluation, Provenance, ScoredItem},
    parsing::{parse_applicability, parse_score, ApplicabilityVerdict},
};
pub use item::{
    bank::{ItemBank, ItemBanks},
    entities::{Item, ItemId, ItemKind},
    parsing::{parse_item_batch, ItemParseError},
};
pub use knowledge::{Document, Passage};
pub use prompt::PromptTemplate;
