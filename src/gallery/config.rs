use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::app::Result;

/// Configuration for crawling the gallery listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Site root that detail hrefs are resolved against
    pub base_url: String,

    /// Listing page path; `{offset}` is replaced with `page * page_size`
    pub listing_path: String,

    /// Number of listing pages to scan (default: 20)
    pub pages: usize,

    /// Entries per listing page (default: 50)
    pub page_size: usize,

    /// CSS selector matching one gallery entry
    pub item_selector: String,

    /// Request timeout in seconds for listing and detail pages (default: 10)
    pub timeout_secs: u64,

    /// Pause between consecutive requests in milliseconds (default: 1000)
    pub delay_ms: u64,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.esa.int".to_string(),
            listing_path: "/ESA_Multimedia/Sets/Earth_from_Space_image_collection/\
                           (offset)/{offset}/(sortBy)/published/(result_type)/images"
                .to_string(),
            pages: 20,
            page_size: 50,
            item_selector: "div.grid-item.image".to_string(),
            timeout_secs: 10,
            delay_ms: 1000,
            user_agent: None,
        }
    }
}

impl GalleryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn offset(&self, page: usize) -> usize {
        page * self.page_size
    }

    /// Absolute URL of the listing page with the given 0-based index
    pub fn page_url(&self, page: usize) -> Result<Url> {
        let path = self
            .listing_path
            .replace("{offset}", &self.offset(page).to_string());
        Ok(self.base()?.join(&path)?)
    }
}
