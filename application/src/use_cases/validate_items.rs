//! Old-item validation component
//!
//! For each previously accepted item: retrieve fresh context keyed on the
//! item's content and ask the generator model a binary applicability
//! question. Only the exact negative token discards; ambiguity retains,
//! because a false negative costs more than a temporarily stale item
//! reappearing.

use crate::ports::knowledge_store::{KnowledgeStore, RetrievalError};
use crate::ports::llm_gateway::LlmGateway;
use examforge_domain::knowledge::join_passages;
use examforge_domain::{parse_applicability, ApplicabilityVerdict, Item, Model, PromptTemplate};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of validating a batch of existing items
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// Items judged still applicable, in input order
    pub retained: Vec<Item>,
    /// Items discarded as outdated
    pub dropped: usize,
}

/// Validator for previously accepted items
pub struct ItemValidator<G: LlmGateway, S: KnowledgeStore> {
    gateway: Arc<G>,
    store: Arc<S>,
    model: Model,
    retrieval_k: usize,
}

impl<G: LlmGateway, S: KnowledgeStore> ItemValidator<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>, model: Model, retrieval_k: usize) -> Self {
        Self {
            gateway,
            store,
            model,
            retrieval_k,
        }
    }

    /// Validate existing items against fresh knowledge, one at a time.
    ///
    /// An unreachable knowledge base propagates and aborts the run. A failed
    /// or ambiguous model reply retains the item (conservative default).
    pub async fn validate(&self, existing: &[Item]) -> Result<ValidationOutcome, RetrievalError> {
        let mut outcome = ValidationOutcome::default();

        for item in existing {
            let passages = self.store.retrieve(&item.content, self.retrieval_k).await?;
            let knowledge = join_passages(&passages);

            let verdict = match self.check_applicability(item, &knowledge).await {
                Ok(reply) => parse_applicability(&reply),
                Err(e) => {
                    warn!(item = %item.id, "Applicability check failed, retaining: {e}");
                    ApplicabilityVerdict::Ambiguous
                }
            };

            debug!(item = %item.id, verdict = ?verdict, "Validated existing item");
            if verdict.retains() {
                outcome.retained.push(item.clone());
            } else {
                outcome.dropped += 1;
            }
        }

        Ok(outcome)
    }

    async fn check_applicability(
        &self,
        item: &Item,
        knowledge: &str,
    ) -> Result<String, crate::ports::llm_gateway::GatewayError> {
        let session = self.gateway.create_session(&self.model).await?;
        session
            .send(&PromptTemplate::applicability_check(&item.content, knowledge))
            .await
    }
}
