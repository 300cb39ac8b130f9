//! LLM provider adapters

pub mod openai_gateway;

pub use openai_gateway::OpenAiCompatGateway;
