//! Knowledge store adapters

pub mod http_store;
pub mod memory_store;

pub use http_store::HttpKnowledgeStore;
pub use memory_store::InMemoryKnowledgeStore;
