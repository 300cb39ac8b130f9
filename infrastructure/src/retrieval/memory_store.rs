//! In-memory knowledge store
//!
//! Term-overlap ranking over documents held in process memory. No
//! embeddings, no network. Intended for local runs and tests; the ranking
//! is deterministic so retrieval-dependent behavior stays reproducible.

use async_trait::async_trait;
use examforge_application::{KnowledgeStore, RetrievalError};
use examforge_domain::{Document, Passage};
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local knowledge store with deterministic term-overlap ranking
#[derive(Default)]
pub struct InMemoryKnowledgeStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with documents at construction time
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

fn terms(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, RetrievalError> {
        let query_terms = terms(query);
        let documents = self.documents.read().await;

        // Score by shared term count; insertion order breaks ties so
        // repeated queries return identical results.
        let mut scored: Vec<(usize, &Document)> = documents
            .iter()
            .map(|doc| {
                let overlap = terms(&doc.content).intersection(&query_terms).count();
                (overlap, doc)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let passages: Vec<Passage> = scored
            .into_iter()
            .take(k)
            .map(|(_, doc)| Passage {
                text: doc.content.clone(),
                metadata: doc.metadata.clone(),
            })
            .collect();

        debug!(k, found = passages.len(), "In-memory retrieval");
        Ok(passages)
    }

    async fn add_documents(&self, documents: &[Document]) -> Result<usize, RetrievalError> {
        let mut store = self.documents.write().await;
        store.extend_from_slice(documents);
        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryKnowledgeStore {
        InMemoryKnowledgeStore::with_documents(vec![
            Document::new("The mitochondria is the powerhouse of the cell"),
            Document::new("Cell membranes regulate what enters and leaves"),
            Document::new("Photosynthesis converts light into chemical energy"),
        ])
    }

    #[tokio::test]
    async fn test_best_overlap_ranks_first() {
        let store = seeded();
        let passages = store.retrieve("powerhouse of the cell", 2).await.unwrap();
        assert_eq!(passages.len(), 2);
        assert!(passages[0].text.contains("mitochondria"));
    }

    #[tokio::test]
    async fn test_k_caps_results() {
        let store = seeded();
        let passages = store.retrieve("cell", 1).await.unwrap();
        assert_eq!(passages.len(), 1);
    }

    #[tokio::test]
    async fn test_no_overlap_returns_empty() {
        let store = seeded();
        let passages = store.retrieve("quantum chromodynamics", 5).await.unwrap();
        assert!(passages.is_empty());
    }

    #[tokio::test]
    async fn test_add_documents_reports_count() {
        let store = InMemoryKnowledgeStore::new();
        let inserted = store
            .add_documents(&[Document::new("one"), Document::new("two")])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let passages = store.retrieve("one", 5).await.unwrap();
        assert_eq!(passages.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_queries_are_deterministic() {
        let store = seeded();
        let first = store.retrieve("cell energy", 3).await.unwrap();
        let second = store.retrieve("cell energy", 3).await.unwrap();
        assert_eq!(first, second);
    }
}
