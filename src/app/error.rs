use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatcapError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSS selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("The directory '{}' was not found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SatcapError>;
