//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid thresholds: high ({high}) must be greater than low ({low})")]
    InvalidThresholds { high: f64, low: f64 },

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Empty content")]
    EmptyContent,
}
