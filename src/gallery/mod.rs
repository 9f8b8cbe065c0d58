//! Gallery crawling: walks the listing pages and collects detail links.
//!
//! ```text
//! page 0..N → PageFetcher → LinkExtractor → LinkCollection
//! ```
//!
//! Pages are fetched one at a time with a fixed pause in between. A page
//! that fails to load is recorded in the collection and the crawl moves
//! on to the next page.

mod config;
mod extractor;

pub use config::GalleryConfig;
pub use extractor::LinkExtractor;

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::Result;
use crate::domain::{LinkCollection, PageOutcome, PageResult};
use crate::fetcher::PageFetcher;

pub struct GalleryCrawler {
    fetcher: Arc<dyn PageFetcher>,
    extractor: LinkExtractor,
    config: GalleryConfig,
}

impl GalleryCrawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: GalleryConfig) -> Result<Self> {
        let extractor = LinkExtractor::new(&config.item_selector)?;
        // Fail on a bad base URL before any request goes out.
        config.base()?;

        Ok(Self {
            fetcher,
            extractor,
            config,
        })
    }

    pub async fn collect_links(&self) -> LinkCollection {
        let total = self.config.pages;
        let mut collection = LinkCollection::default();

        info!("Collecting links from {} gallery pages", total);

        for page in 0..total {
            if page > 0 {
                pause(self.config.delay()).await;
            }

            let outcome = self.scan_page(page, &mut collection).await;
            match &outcome.result {
                PageResult::Scanned { links } => info!(
                    "Page {}/{} scanned: {} links, {} so far",
                    page + 1,
                    total,
                    links,
                    collection.links.len()
                ),
                PageResult::Failed { reason } => {
                    warn!("Could not fetch gallery page {}: {}", page + 1, reason)
                }
            }
            collection.pages.push(outcome);
        }

        info!(
            "Finished collecting links: {} detail pages",
            collection.links.len()
        );
        collection
    }

    async fn scan_page(&self, page: usize, collection: &mut LinkCollection) -> PageOutcome {
        let offset = self.config.offset(page);
        let url = match self.config.page_url(page) {
            Ok(url) => url.to_string(),
            Err(e) => {
                return PageOutcome {
                    page,
                    offset,
                    url: String::new(),
                    result: PageResult::Failed {
                        reason: e.to_string(),
                    },
                }
            }
        };

        let result = match self.fetcher.fetch(&url).await {
            Ok(body) => {
                let links = self.extractor.extract(&body);
                let count = links.len();
                collection.links.extend(links);
                PageResult::Scanned { links: count }
            }
            Err(e) => PageResult::Failed {
                reason: e.to_string(),
            },
        };

        PageOutcome {
            page,
            offset,
            url,
            result,
        }
    }
}

pub(crate) async fn pause(delay: std::time::Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
