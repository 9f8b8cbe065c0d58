//! Detail-page descriptions into caption files.
//!
//! ```text
//! DetailLink → PageFetcher → DescriptionExtractor → Summarizer → FileSink
//! ```
//!
//! Items are processed sequentially in discovery order. An item that
//! cannot be fetched, summarized or written is recorded as skipped and the
//! run continues; nothing is retried.

mod config;
mod extractor;

pub use config::DescriptionConfig;
pub use extractor::DescriptionExtractor;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::app::Result;
use crate::domain::{DetailLink, ItemOutcome, RunReport};
use crate::fetcher::PageFetcher;
use crate::gallery::{pause, GalleryConfig};
use crate::sink::FileSink;
use crate::summarizer::{finalize_summary, LengthBudget, Summarizer};

pub struct DescriptionPipeline {
    fetcher: Arc<dyn PageFetcher>,
    summarizer: Arc<dyn Summarizer>,
    extractor: DescriptionExtractor,
    sink: FileSink,
    base: Url,
    budget: LengthBudget,
    fallback: String,
    delay: Duration,
}

impl DescriptionPipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Arc<dyn Summarizer>,
        sink: FileSink,
        gallery: &GalleryConfig,
        config: &DescriptionConfig,
        budget: LengthBudget,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            summarizer,
            extractor: DescriptionExtractor::new(&config.container_selector)?,
            sink,
            base: gallery.base()?,
            budget,
            fallback: config.fallback_text.clone(),
            delay: gallery.delay(),
        })
    }

    pub async fn run(&self, links: &[DetailLink]) -> RunReport {
        let total = links.len();
        let mut report = RunReport::start();
        let mut written = 0;

        info!("Starting description extraction for {} pages", total);

        for (position, link) in links.iter().enumerate() {
            if position > 0 {
                pause(self.delay).await;
            }

            let result = match link.resolve(&self.base) {
                Ok(url) => {
                    let url = url.to_string();
                    let saved = self.process(&url, written + 1).await;
                    (url, saved)
                }
                Err(e) => (link.href().to_string(), Err(e)),
            };

            let outcome = match result {
                (url, Ok(path)) => {
                    written += 1;
                    info!("({}/{}) Saved description for {}", position + 1, total, url);
                    ItemOutcome::Written {
                        index: written,
                        url,
                        path,
                    }
                }
                (url, Err(e)) => {
                    warn!("({}/{}) Error on {}: {}", position + 1, total, url, e);
                    ItemOutcome::Skipped {
                        url,
                        reason: e.to_string(),
                    }
                }
            };
            report.items.push(outcome);
        }

        let report = report.finish();
        info!(
            "Descriptions complete: {} written, {} skipped",
            report.written(),
            report.skipped()
        );
        report
    }

    async fn process(&self, url: &str, index: usize) -> Result<PathBuf> {
        let text = self.describe(url).await?;
        self.sink.write(index, &text)
    }

    /// Fetch one detail page and produce its caption text.
    pub async fn describe(&self, url: &str) -> Result<String> {
        let body = self.fetcher.fetch(url).await?;
        let raw = self.extractor.extract(&body);

        if raw.is_empty() {
            debug!("No description text on {}", url);
            return Ok(self.fallback.clone());
        }

        let summary = self.summarizer.summarize(&raw, self.budget).await?;
        Ok(finalize_summary(&summary, self.budget.max))
    }
}
