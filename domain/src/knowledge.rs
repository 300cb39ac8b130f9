//! Knowledge-base value objects
//!
//! [`Passage`] is what retrieval returns; [`Document`] is what gets inserted.
//! Both are transport-neutral — the vector index itself lives behind the
//! `KnowledgeStore` port in the application layer.

use serde::{Deserialize, Serialize};

/// A single retrieved passage, most-relevant-first within its batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text
    pub text: String,
    /// Optional store-side metadata (source id, tags, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Passage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A document to insert into the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document content
    pub content: String,
    /// Optional metadata stored alongside the embedding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Join passages into a single context block for prompt construction
pub fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_passages() {
        let passages = vec![Passage::new("alpha"), Passage::new("beta")];
        assert_eq!(join_passages(&passages), "alpha\nbeta");
    }

    #[test]
    fn test_join_empty_is_empty() {
        assert_eq!(join_passages(&[]), "");
    }
}
