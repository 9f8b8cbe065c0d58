use scraper::Selector;

use crate::app::{Result, SatcapError};

/// Parse a configured CSS selector, keeping the offending text in the error.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SatcapError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
