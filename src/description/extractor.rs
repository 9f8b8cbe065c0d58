use scraper::{Html, Selector};

use crate::app::Result;
use crate::html::parse_selector;

/// Reads the description paragraphs of a detail page
pub struct DescriptionExtractor {
    container: Selector,
    paragraph: Selector,
}

impl DescriptionExtractor {
    pub fn new(container_selector: &str) -> Result<Self> {
        Ok(Self {
            container: parse_selector(container_selector)?,
            paragraph: parse_selector("p")?,
        })
    }

    /// Text of every `<p>` in the first description container, each
    /// trimmed, joined by single spaces. Empty when the container is
    /// missing or has no paragraphs.
    pub fn extract(&self, body: &[u8]) -> String {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let Some(container) = document.select(&self.container).next() else {
            return String::new();
        };

        container
            .select(&self.paragraph)
            .map(|p| p.text().collect::<String>().trim().to_string())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}
