//! Item entity and its value objects

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Opaque item identifier
///
/// Generated items get a fresh UUID; externally supplied items keep whatever
/// identifier the caller handed in. Identity is stable across validation,
/// scoring, and decision stages of the same run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of test item
///
/// A fixed core set plus `Custom` for kinds the schema does not know about.
/// Serialized as snake_case strings (`"multiple_choice"`, ...) to match the
/// wire format items arrive in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    MultipleChoice,
    ShortAnswer,
    TrueFalse,
    Essay,
    Custom(String),
}

impl ItemKind {
    /// Get the string identifier for this kind
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::MultipleChoice => "multiple_choice",
            ItemKind::ShortAnswer => "short_answer",
            ItemKind::TrueFalse => "true_false",
            ItemKind::Essay => "essay",
            ItemKind::Custom(s) => s,
        }
    }

    /// Whether an item of this kind must carry a non-empty answer
    ///
    /// Essay questions and unknown custom kinds are graded free-form and may
    /// ship without a model answer; everything else needs one.
    pub fn requires_answer(&self) -> bool {
        !matches!(self, ItemKind::Essay | ItemKind::Custom(_))
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "multiple_choice" => ItemKind::MultipleChoice,
            "short_answer" => ItemKind::ShortAnswer,
            "true_false" => ItemKind::TrueFalse,
            "essay" => ItemKind::Essay,
            other => ItemKind::Custom(other.to_string()),
        })
    }
}

impl Serialize for ItemKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(ItemKind::Custom(s)))
    }
}

/// A single educational test item (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity across the stages of one run
    pub id: ItemId,
    /// Question text
    pub content: String,
    /// Item kind
    pub kind: ItemKind,
    /// Model answer (may be empty for kinds that do not require one)
    pub answer: String,
    /// Open extension map (e.g. `options` for multiple choice)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Item {
    /// Create a new item with a generated identifier
    pub fn new(kind: ItemKind, content: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            content: content.into(),
            kind,
            answer: answer.into(),
            attributes: HashMap::new(),
        }
    }

    /// Create an item with an externally supplied identifier
    pub fn with_id(
        id: impl Into<ItemId>,
        kind: ItemKind,
        content: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            kind,
            answer: answer.into(),
            attributes: HashMap::new(),
        }
    }

    /// Attach an attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Answer-choice options for multiple-choice items, if present
    pub fn options(&self) -> Option<&Vec<serde_json::Value>> {
        self.attributes.get("options").and_then(|v| v.as_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Item::new(ItemKind::ShortAnswer, "Define elasticity.", "Sensitivity of demand.");
        let b = Item::new(ItemKind::ShortAnswer, "Define elasticity.", "Sensitivity of demand.");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_external_id_preserved() {
        let item = Item::with_id("old_q_1", ItemKind::ShortAnswer, "Old question", "Answer");
        assert_eq!(item.id.as_str(), "old_q_1");
    }

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in [
            ItemKind::MultipleChoice,
            ItemKind::ShortAnswer,
            ItemKind::TrueFalse,
            ItemKind::Essay,
        ] {
            let parsed: ItemKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind_becomes_custom() {
        let parsed: ItemKind = "matching".parse().unwrap();
        assert_eq!(parsed, ItemKind::Custom("matching".to_string()));
        assert!(!parsed.requires_answer());
    }

    #[test]
    fn test_requires_answer() {
        assert!(ItemKind::MultipleChoice.requires_answer());
        assert!(ItemKind::ShortAnswer.requires_answer());
        assert!(ItemKind::TrueFalse.requires_answer());
        assert!(!ItemKind::Essay.requires_answer());
    }

    #[test]
    fn test_options_attribute() {
        let item = Item::new(ItemKind::MultipleChoice, "Pick one", "A")
            .with_attribute("options", serde_json::json!(["A", "B", "C", "D"]));
        assert_eq!(item.options().unwrap().len(), 4);
    }

    #[test]
    fn test_kind_serde_as_snake_case() {
        let json = serde_json::to_string(&ItemKind::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple_choice\"");
        let back: ItemKind = serde_json::from_str("\"essay\"").unwrap();
        assert_eq!(back, ItemKind::Essay);
    }
}
