//! Hi-res image download for collected detail links.
//!
//! Each detail page carries a download dropdown; the first entry whose
//! title mentions the hi-res marker and whose href ends in an accepted
//! image extension is fetched and saved next to its siblings as
//! `<prefix><NNNN><ext>`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::app::{Result, SatcapError};
use crate::domain::{DetailLink, ItemOutcome, RunReport};
use crate::fetcher::PageFetcher;
use crate::gallery::{pause, GalleryConfig};
use crate::html::parse_selector;
use crate::sink::FileSink;

/// Configuration for the hi-res image download job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub output_dir: PathBuf,
    pub file_prefix: String,

    /// CSS selector of the download menu on a detail page
    pub dropdown_selector: String,

    /// Lowercase text a download link title must contain
    pub title_marker: String,

    /// Accepted file extensions, lowercase with leading dot
    pub extensions: Vec<String>,

    /// Download timeout in seconds (default: 20)
    pub timeout_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("esa_images"),
            file_prefix: "image_".to_string(),
            dropdown_selector: "div.dropdown".to_string(),
            title_marker: "hi-res".to_string(),
            extensions: vec![".jpg".to_string(), ".jpeg".to_string(), ".png".to_string()],
            timeout_secs: 20,
        }
    }
}

impl ImageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Finds the hi-res download href on a detail page
pub struct HiResLocator {
    dropdown: Selector,
    anchor: Selector,
    marker: String,
    extensions: Vec<String>,
}

impl HiResLocator {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        Ok(Self {
            dropdown: parse_selector(&config.dropdown_selector)?,
            anchor: parse_selector("a[href][title]")?,
            marker: config.title_marker.to_lowercase(),
            extensions: config.extensions.iter().map(|e| e.to_lowercase()).collect(),
        })
    }

    pub fn locate(&self, body: &[u8]) -> Option<String> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);
        let dropdown = document.select(&self.dropdown).next()?;

        for anchor in dropdown.select(&self.anchor) {
            let (Some(title), Some(href)) = (anchor.value().attr("title"), anchor.value().attr("href"))
            else {
                continue;
            };
            let href = href.trim();
            let lower = href.to_lowercase();

            if title.to_lowercase().contains(&self.marker)
                && self.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
            {
                return Some(href.to_string());
            }
        }

        None
    }
}

pub struct ImageDownloader {
    pages: Arc<dyn PageFetcher>,
    assets: Arc<dyn PageFetcher>,
    locator: HiResLocator,
    sink: FileSink,
    base: Url,
    delay: Duration,
}

impl ImageDownloader {
    /// `pages` fetches detail pages, `assets` fetches the image files.
    pub fn new(
        pages: Arc<dyn PageFetcher>,
        assets: Arc<dyn PageFetcher>,
        sink: FileSink,
        gallery: &GalleryConfig,
        config: &ImageConfig,
    ) -> Result<Self> {
        Ok(Self {
            pages,
            assets,
            locator: HiResLocator::new(config)?,
            sink,
            base: gallery.base()?,
            delay: gallery.delay(),
        })
    }

    pub async fn run(&self, links: &[DetailLink]) -> RunReport {
        let total = links.len();
        let mut report = RunReport::start();
        let mut saved = 0;

        info!("Downloading hi-res images for {} pages", total);

        for (position, link) in links.iter().enumerate() {
            if position > 0 {
                pause(self.delay).await;
            }

            let url = match link.resolve(&self.base) {
                Ok(url) => url.to_string(),
                Err(_) => link.href().to_string(),
            };

            let outcome = match self.download(link, saved + 1).await {
                Ok(path) => {
                    saved += 1;
                    info!("({}/{}) Saved {}", position + 1, total, path.display());
                    ItemOutcome::Written {
                        index: saved,
                        url,
                        path,
                    }
                }
                Err(e) => {
                    warn!("({}/{}) Could not process {}: {}", position + 1, total, url, e);
                    ItemOutcome::Skipped {
                        url,
                        reason: e.to_string(),
                    }
                }
            };
            report.items.push(outcome);
        }

        report.finish()
    }

    async fn download(&self, link: &DetailLink, index: usize) -> Result<PathBuf> {
        let page_url = link.resolve(&self.base)?;
        let body = self.pages.fetch(page_url.as_str()).await?;

        let href = self.locator.locate(&body).ok_or_else(|| {
            SatcapError::Other(format!("No hi-res image link found on {}", page_url))
        })?;
        let image_url = self.base.join(&href)?;

        let extension = image_extension(&image_url);
        let bytes = self.assets.fetch(image_url.as_str()).await?;

        self.sink.write_bytes(index, &extension, &bytes)
    }
}

/// Extension of the URL's last path segment, with the leading dot.
fn image_extension(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rfind('.').map(|i| name[i..].to_string()))
        .unwrap_or_default()
}
