//! Text summarization behind a narrow async interface.
//!
//! - [`HuggingFaceSummarizer`]: calls a hosted seq2seq summarization model
//! - [`ExtractiveSummarizer`]: offline, keeps the leading sentences
//!
//! Whatever the backend returns is passed through [`finalize_summary`]
//! before it is persisted.

mod config;
mod extractive;
mod huggingface;

pub use config::{SummarizerBackend, SummarizerConfig};
pub use extractive::ExtractiveSummarizer;
pub use huggingface::HuggingFaceSummarizer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Result;

/// Output length bounds, in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBudget {
    pub min: usize,
    pub max: usize,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize non-empty `text` into exactly one string within `budget`,
    /// using deterministic decoding.
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String>;
}

/// Build the summarizer selected by the configuration
pub fn from_config(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    let summarizer: Arc<dyn Summarizer> = match config.backend {
        SummarizerBackend::HuggingFace => Arc::new(HuggingFaceSummarizer::new(config.clone())?),
        SummarizerBackend::Extractive => Arc::new(ExtractiveSummarizer),
    };
    Ok(summarizer)
}

/// Lowercase, trim, and clamp to at most `max_tokens` whitespace tokens.
pub fn finalize_summary(summary: &str, max_tokens: usize) -> String {
    let normalized = summary.to_lowercase();
    let trimmed = normalized.trim();

    if trimmed.split_whitespace().count() <= max_tokens {
        return trimmed.to_string();
    }

    trimmed
        .split_whitespace()
        .take(max_tokens)
        .collect::<Vec<_>>()
        .join(" ")
}
