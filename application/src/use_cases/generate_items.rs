//! Item generation component
//!
//! Retrieves knowledge for the task description and asks the generator model
//! for a batch of candidate items. Malformed model output never raises: the
//! batch degrades to empty and the failure is counted for telemetry. Only an
//! unreachable knowledge base propagates.

use crate::ports::knowledge_store::{KnowledgeStore, RetrievalError};
use crate::ports::llm_gateway::LlmGateway;
use examforge_domain::knowledge::join_passages;
use examforge_domain::{parse_item_batch, Item, Model, PromptTemplate};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one generation attempt
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    /// Parsed candidate items (possibly empty)
    pub items: Vec<Item>,
    /// Responses that produced no usable batch this attempt
    pub parse_failures: usize,
}

/// RAG item generator
pub struct ItemGenerator<G: LlmGateway, S: KnowledgeStore> {
    gateway: Arc<G>,
    store: Arc<S>,
    model: Model,
    retrieval_k: usize,
}

impl<G: LlmGateway, S: KnowledgeStore> ItemGenerator<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>, model: Model, retrieval_k: usize) -> Self {
        Self {
            gateway,
            store,
            model,
            retrieval_k,
        }
    }

    /// Generate candidate items for a task description.
    ///
    /// An empty retrieval result is "no context" and generation proceeds
    /// without it; `RetrievalError::Unavailable` aborts the run and is the
    /// only error this returns.
    pub async fn generate(&self, task_description: &str) -> Result<GenerationOutcome, RetrievalError> {
        let passages = self.store.retrieve(task_description, self.retrieval_k).await?;
        debug!(
            passages = passages.len(),
            "Retrieved context for generation"
        );
        let knowledge = join_passages(&passages);

        let response = match self.request_batch(task_description, &knowledge).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Generation request failed, degrading to empty batch: {e}");
                return Ok(GenerationOutcome {
                    items: vec![],
                    parse_failures: 1,
                });
            }
        };

        match parse_item_batch(&response) {
            Ok(items) => {
                debug!(count = items.len(), "Parsed candidate items");
                Ok(GenerationOutcome {
                    items,
                    parse_failures: 0,
                })
            }
            Err(e) => {
                warn!("Generation response unparseable, degrading to empty batch: {e}");
                Ok(GenerationOutcome {
                    items: vec![],
                    parse_failures: 1,
                })
            }
        }
    }

    async fn request_batch(
        &self,
        task_description: &str,
        knowledge: &str,
    ) -> Result<String, crate::ports::llm_gateway::GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, PromptTemplate::generation_system())
            .await?;
        session
            .send(&PromptTemplate::generate_items(task_description, knowledge))
            .await
    }
}
