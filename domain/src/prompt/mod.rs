//! Prompt domain
//!
//! Templates for the four LLM interactions of one pipeline run: task
//! understanding, item generation, applicability checking, and scoring.

mod template;

pub use template::PromptTemplate;
