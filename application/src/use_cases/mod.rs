//! Use cases composing the domain logic with the ports
//!
//! - [`generate_items`] — RAG generation of candidate items
//! - [`validate_items`] — applicability re-check of previously accepted items
//! - [`score_items`] — independent-model quality scoring with fallback
//! - [`run_pipeline`] — the orchestrator tying one run together

pub mod generate_items;
pub mod run_pipeline;
pub mod score_items;
pub mod validate_items;

pub use generate_items::ItemGenerator;
pub use run_pipeline::RunPipelineUseCase;
pub use score_items::ItemScorer;
pub use validate_items::ItemValidator;
