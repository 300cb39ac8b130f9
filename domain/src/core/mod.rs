//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — a named LLM capability (generator or evaluator role)
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
