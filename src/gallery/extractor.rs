use scraper::{Html, Selector};

use crate::app::Result;
use crate::domain::DetailLink;
use crate::html::parse_selector;

/// Pulls detail-page hrefs out of a gallery listing page
pub struct LinkExtractor {
    item: Selector,
    anchor: Selector,
}

impl LinkExtractor {
    pub fn new(item_selector: &str) -> Result<Self> {
        Ok(Self {
            item: parse_selector(item_selector)?,
            anchor: parse_selector("a")?,
        })
    }

    /// Href of the first anchor inside each gallery item, in document order.
    ///
    /// Items without an anchor, or whose first anchor has no href, are skipped.
    pub fn extract(&self, body: &[u8]) -> Vec<DetailLink> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        document
            .select(&self.item)
            .filter_map(|item| item.select(&self.anchor).next())
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(DetailLink::new)
            .collect()
    }
}
