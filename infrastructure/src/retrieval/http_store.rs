//! HTTP vector-store client
//!
//! Talks to an external retrieval service over a small JSON API. An
//! unreachable service is surfaced as [`RetrievalError::Unavailable`] so the
//! pipeline can abort the run instead of generating ungrounded content.

use async_trait::async_trait;
use examforge_application::{KnowledgeStore, RetrievalError};
use examforge_domain::{Document, Passage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    passages: Vec<Passage>,
}

#[derive(Debug, Serialize)]
struct IngestRequest<'a> {
    documents: &'a [Document],
}

#[derive(Debug, Deserialize)]
struct IngestResponse {
    inserted: usize,
}

/// Client for an external vector-store service
pub struct HttpKnowledgeStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpKnowledgeStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RetrievalError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> RetrievalError {
    if e.is_connect() || e.is_timeout() {
        RetrievalError::Unavailable(e.to_string())
    } else {
        RetrievalError::Other(e.to_string())
    }
}

#[async_trait]
impl KnowledgeStore for HttpKnowledgeStore {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Passage>, RetrievalError> {
        let url = format!("{}/query", self.base_url);
        debug!(%url, k, "Querying knowledge store");

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { query, k })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(RetrievalError::Unavailable(format!(
                "store returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(RetrievalError::Other(format!("store returned {status}")));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::Other(format!("malformed response: {e}")))?;

        Ok(parsed.passages)
    }

    async fn add_documents(&self, documents: &[Document]) -> Result<usize, RetrievalError> {
        let url = format!("{}/documents", self.base_url);
        debug!(%url, count = documents.len(), "Ingesting documents");

        let response = self
            .client
            .post(&url)
            .json(&IngestRequest { documents })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(RetrievalError::Unavailable(format!(
                "store returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(RetrievalError::Other(format!("store returned {status}")));
        }

        let parsed: IngestResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::Other(format!("malformed response: {e}")))?;

        Ok(parsed.inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_store_reports_unavailable() {
        // Nothing listens on this port
        let store =
            HttpKnowledgeStore::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let result = store.retrieve("anything", 3).await;
        assert!(matches!(result, Err(RetrievalError::Unavailable(_))));
    }
}
