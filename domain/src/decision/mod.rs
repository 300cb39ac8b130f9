//! Three-way decision domain
//!
//! This module contains the core decision making of the pipeline.
//!
//! # Core Concepts
//!
//! ## Three-Way Decision
//! Two thresholds split scored items into accept / reject / review instead
//! of a single cutoff. Review items are resolved by a [`ReviewPolicy`] so
//! every item lands in exactly one terminal set.
//!
//! ## Threshold Adaptation
//! Thresholds drift between runs via a [`ThresholdAdapter`] strategy. The
//! shipped baseline is a bounded random perturbation — a stated stand-in for
//! a principled controller — but whatever the strategy, `high > low` holds
//! after every adaptation.

pub mod adapter;
pub mod engine;
pub mod review_policy;
pub mod thresholds;

// Re-export main types
pub use adapter::{
    FixedThresholdAdapter, RandomPerturbationAdapter, RunOutcomes, ThresholdAdapter,
};
pub use engine::{DecisionOutcome, DecisionPartition, ThreeWayDecisionEngine};
pub use review_policy::{AcceptAllReviewPolicy, MarkerReviewPolicy, ReviewPolicy};
pub use thresholds::DecisionThresholds;
