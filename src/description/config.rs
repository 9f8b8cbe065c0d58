use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for turning detail pages into description files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionConfig {
    /// Directory receiving one text file per detail page
    pub output_dir: PathBuf,

    /// File name prefix, followed by the 4-digit index
    pub file_prefix: String,

    /// CSS selector of the element holding the description paragraphs
    pub container_selector: String,

    /// Written instead of a summary when a page has no description text
    pub fallback_text: String,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("esa_description"),
            file_prefix: "desc_".to_string(),
            container_selector: "div.modal__tab-description".to_string(),
            fallback_text: "no description available".to_string(),
        }
    }
}
