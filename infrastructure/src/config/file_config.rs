//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! map onto the application layer's [`PipelineSettings`].

use examforge_application::PipelineSettings;
use examforge_domain::{DecisionThresholds, Model};
use serde::{Deserialize, Serialize};

/// Raw threshold configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileThresholdsConfig {
    pub high: f64,
    pub low: f64,
}

impl Default for FileThresholdsConfig {
    fn default() -> Self {
        Self {
            high: 80.0,
            low: 40.0,
        }
    }
}

/// Raw model-role configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Generation model name
    pub generator: String,
    /// Evaluation model name (independent, typically stronger)
    pub evaluator: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            generator: Model::default_generator().to_string(),
            evaluator: Model::default_evaluator().to_string(),
        }
    }
}

/// Raw retrieval configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Passages fetched per query
    pub k: usize,
    /// Base URL of the vector-store service, if using the HTTP adapter
    pub base_url: Option<String>,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            k: 5,
            base_url: None,
        }
    }
}

/// Raw LLM provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Raw review-policy configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Disqualifying content marker for the default review policy
    pub disqualifying_marker: String,
    /// Maximum per-run threshold jitter
    pub jitter: f64,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            disqualifying_marker: "[placeholder]".to_string(),
            jitter: 1.0,
        }
    }
}

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub thresholds: FileThresholdsConfig,
    pub models: FileModelsConfig,
    pub retrieval: FileRetrievalConfig,
    pub provider: FileProviderConfig,
    pub review: FileReviewConfig,
}

impl FileConfig {
    /// Map the raw config onto pipeline settings.
    ///
    /// Invalid threshold pairs clamp into validity rather than failing
    /// startup; the clamped pair is what the pipeline runs with.
    pub fn to_settings(&self) -> PipelineSettings {
        let thresholds =
            DecisionThresholds::new(self.thresholds.high, self.thresholds.low)
                .unwrap_or_else(|_| {
                    DecisionThresholds::clamped(self.thresholds.high, self.thresholds.low)
                });

        PipelineSettings {
            generator: Model::new(&self.models.generator),
            evaluator: Model::new(&self.models.evaluator),
            retrieval_k: self.retrieval.k.max(1),
            thresholds,
            review_marker: self.review.disqualifying_marker.clone(),
            jitter: self.review.jitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_valid_settings() {
        let settings = FileConfig::default().to_settings();
        assert_eq!(settings.thresholds.high(), 80.0);
        assert_eq!(settings.thresholds.low(), 40.0);
        assert_eq!(settings.retrieval_k, 5);
    }

    #[test]
    fn test_crossed_thresholds_clamp_instead_of_failing() {
        let config = FileConfig {
            thresholds: FileThresholdsConfig {
                high: 30.0,
                low: 90.0,
            },
            ..Default::default()
        };
        let settings = config.to_settings();
        assert!(settings.thresholds.high() > settings.thresholds.low());
    }

    #[test]
    fn test_toml_roundtrip() {
        let toml_str = r#"
[thresholds]
high = 85.0
low = 50.0

[models]
generator = "gpt-4o-mini"
evaluator = "gpt-4o"

[retrieval]
k = 3
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.thresholds.high, 85.0);
        assert_eq!(config.retrieval.k, 3);
        // Unspecified sections fall back to defaults
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_zero_k_bumped_to_one() {
        let config = FileConfig {
            retrieval: FileRetrievalConfig {
                k: 0,
                base_url: None,
            },
            ..Default::default()
        };
        assert_eq!(config.to_settings().retrieval_k, 1);
    }
}
