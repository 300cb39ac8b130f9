//! Model value object naming an LLM capability

use serde::{Deserialize, Serialize};

/// A named LLM model (Value Object)
///
/// The pipeline uses two model roles: a *generator* that understands the
/// task, produces candidate items, and answers applicability questions, and
/// an independent (typically stronger) *evaluator* that scores items. Both
/// roles are plain model names resolved by the gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    /// Create a model from its provider-side name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the model name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default generation model
    pub fn default_generator() -> Self {
        Self::new("gpt-4o-mini")
    }

    /// Default evaluation model (independent, stronger than the generator)
    pub fn default_evaluator() -> Self {
        Self::new("gpt-4o")
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let m = Model::new("gpt-4o");
        assert_eq!(m.as_str(), "gpt-4o");
        assert_eq!(m.to_string(), "gpt-4o");
    }

    #[test]
    fn test_default_roles_differ() {
        assert_ne!(Model::default_generator(), Model::default_evaluator());
    }
}
