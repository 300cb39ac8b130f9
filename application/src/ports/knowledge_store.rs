//! Knowledge store port
//!
//! The retrieval capability contract: given free text, return the top-k most
//! relevant passages. Also supports inserting documents so collaborators can
//! populate the knowledge base.

use async_trait::async_trait;
use examforge_domain::{Document, Passage};
use thiserror::Error;

/// Errors from the retrieval capability
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The backing index cannot be reached. Propagates and aborts the run;
    /// an *empty* result is "no context" and never this error.
    #[error("Knowledge base unavailable: {0}")]
    Unavailable(String),

    #[error("Retrieval failed: {0}")]
    Other(String),
}

/// Vector-index capability behind the pipeline
///
/// `retrieve` must be deterministic for a fixed index and query, ordered
/// most-relevant-first by the underlying similarity metric, and return at
/// most `k` passages.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Retrieve up to `k` passages relevant to `query`
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, RetrievalError>;

    /// Insert documents with metadata; returns the number inserted
    async fn add_documents(&self, documents: &[Document]) -> Result<usize, RetrievalError>;
}
