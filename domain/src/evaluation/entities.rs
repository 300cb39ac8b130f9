//! Evaluation value objects

use crate::item::entities::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Whether a scored item was generated this run or carried in from a bank
///
/// Provenance changes the scoring criteria: new items are additionally
/// judged on similarity to the existing bank, a dimension that makes no
/// sense for items already in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    New,
    Existing,
}

impl Provenance {
    pub fn is_new(&self) -> bool {
        matches!(self, Provenance::New)
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::New => write!(f, "new"),
            Provenance::Existing => write!(f, "existing"),
        }
    }
}

/// A single quality score for an item, produced once per item per run
///
/// Scores are clamped to `[0, 100]` at construction so downstream decision
/// logic never sees an out-of-range value. Evaluations live only as long as
/// the run that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The item this evaluation refers to
    pub item_id: ItemId,
    /// Quality score in `[0, 100]`
    pub score: f64,
    /// New vs. existing at scoring time
    pub provenance: Provenance,
}

impl Evaluation {
    pub fn new(item_id: ItemId, score: f64, provenance: Provenance) -> Self {
        Self {
            item_id,
            score: score.clamp(0.0, 100.0),
            provenance,
        }
    }
}

/// An item paired with its evaluation, ready for the decision engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: Item,
    pub evaluation: Evaluation,
}

impl ScoredItem {
    pub fn new(item: Item, evaluation: Evaluation) -> Self {
        debug_assert_eq!(item.id, evaluation.item_id);
        Self { item, evaluation }
    }

    pub fn score(&self) -> f64 {
        self.evaluation.score
    }
}
