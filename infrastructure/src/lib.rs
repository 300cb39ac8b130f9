//! Infrastructure layer for examforge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod retrieval;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use providers::OpenAiCompatGateway;
pub use retrieval::{HttpKnowledgeStore, InMemoryKnowledgeStore};
