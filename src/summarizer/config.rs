use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::summarizer::LengthBudget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerBackend {
    /// Hosted inference endpoint (default)
    #[serde(alias = "hf")]
    HuggingFace,
    /// Offline lead-sentence summaries
    Extractive,
}

/// Configuration for the summarization capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub backend: SummarizerBackend,

    /// Inference endpoint URL
    pub endpoint: String,

    /// Model identifier, informational for the hosted backend
    pub model: String,

    /// API token; falls back to the `HF_TOKEN` environment variable
    pub api_key: Option<String>,

    /// Minimum summary length in tokens (default: 10)
    pub min_length: usize,

    /// Maximum summary length in tokens (default: 40)
    pub max_length: usize,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

/// Serverless inference route for the default model
pub const DEFAULT_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn";

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            backend: SummarizerBackend::HuggingFace,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "facebook/bart-large-cnn".to_string(),
            api_key: None,
            min_length: 10,
            max_length: 40,
            timeout_secs: 60,
        }
    }
}

impl SummarizerConfig {
    pub fn budget(&self) -> LengthBudget {
        LengthBudget {
            min: self.min_length,
            max: self.max_length,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
