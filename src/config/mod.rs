//! Configuration management for satcap.
//!
//! Configuration is read from `~/.config/satcap/config.toml` (or the path
//! given with `--config`). If the default file doesn't exist, a default
//! configuration with comments is created.

use crate::captions::CaptionConfig;
use crate::description::DescriptionConfig;
use crate::gallery::GalleryConfig;
use crate::images::ImageConfig;
use crate::summarizer::SummarizerConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gallery: GalleryConfig,
    pub descriptions: DescriptionConfig,
    pub summarizer: SummarizerConfig,
    pub captions: CaptionConfig,
    pub images: ImageConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default path.
    ///
    /// An explicit path must exist. A missing default file is created with
    /// commented defaults. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/satcap/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("satcap").join("config.toml"))
    }

    /// Create a default config file with comments.
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    pub fn default_config_content() -> String {
        r##"# satcap configuration

[gallery]
# Detail-page hrefs are resolved against this URL
base_url = "https://www.esa.int"

# Listing page path; {offset} becomes page * page_size
listing_path = "/ESA_Multimedia/Sets/Earth_from_Space_image_collection/(offset)/{offset}/(sortBy)/published/(result_type)/images"

# Number of listing pages and entries per page
pages = 20
page_size = 50

# One gallery entry; its first <a href> is the detail link
item_selector = "div.grid-item.image"

# Request timeout in seconds
timeout_secs = 10

# Pause between requests in milliseconds
delay_ms = 1000

[descriptions]
output_dir = "esa_description"
file_prefix = "desc_"

# Element whose <p> children hold the description
container_selector = "div.modal__tab-description"

# Written when a page has no description text
fallback_text = "no description available"

[summarizer]
# "huggingface" (hosted model) or "extractive" (offline, leading sentences)
backend = "huggingface"
# Hosted inference goes through the router; the older
# api-inference.huggingface.co/models/... host is being retired
endpoint = "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn"
model = "facebook/bart-large-cnn"

# api_key = "hf_..."   (or set HF_TOKEN)

# Summary length bounds in tokens
min_length = 10
max_length = 40

timeout_secs = 60

[captions]
dir = "esa_summaries"

# Appended verbatim to every caption file
trigger = ", sat-art style"

[images]
output_dir = "esa_images"
file_prefix = "image_"
dropdown_selector = "div.dropdown"
title_marker = "hi-res"
extensions = [".jpg", ".jpeg", ".png"]
timeout_secs = 20
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
