//! Application layer for examforge
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod telemetry;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineSettings;
pub use ports::{
    knowledge_store::{KnowledgeStore, RetrievalError},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, PipelinePhase, ProgressNotifier},
};
pub use telemetry::RunTelemetry;
pub use use_cases::run_pipeline::{
    RunPipelineError, RunPipelineInput, RunPipelineOutput, RunPipelineUseCase,
};
