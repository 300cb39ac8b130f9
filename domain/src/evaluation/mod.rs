//! Evaluation domain
//!
//! An [`Evaluation`](entities::Evaluation) is a single quality score for an
//! item, tagged with provenance (newly generated vs. pre-existing). The
//! parsing submodule turns free-form evaluator replies into scores and
//! applicability verdicts.

pub mod entities;
pub mod parsing;

pub use entities::{Evaluation, Provenance, ScoredItem};
pub use parsing::{parse_applicability, parse_score, ApplicabilityVerdict};
