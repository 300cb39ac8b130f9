//! Ports (capability contracts) for the application layer
//!
//! Adapters implementing these traits live in the infrastructure layer and
//! are injected at the composition root.

pub mod knowledge_store;
pub mod llm_gateway;
pub mod progress;
