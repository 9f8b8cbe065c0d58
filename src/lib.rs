//! # satcap
//!
//! Builds a caption dataset from a public image gallery.
//!
//! ## Architecture
//!
//! ```text
//! Gallery pages → Link extractor → Detail pages → Description extractor
//!     → Summarizer → Numbered text files
//! ```
//!
//! A separate job appends a style trigger to every caption file, and an
//! optional job downloads the hi-res image behind each detail page.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write ~/.config/satcap/config.toml
//! satcap init
//!
//! # Crawl the gallery and keep the links
//! satcap links --save links.json
//!
//! # Summarize every detail page into esa_description/desc_NNNN.txt
//! satcap describe --from links.json
//!
//! # Append ", sat-art style" to every caption file
//! satcap caption --dir esa_description
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration, the page
/// fetcher and the summarizer into the jobs.
pub mod app;

/// Caption trigger appender.
pub mod captions;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/satcap/config.toml`, one section per job.
pub mod config;

/// Detail page → summarized description file pipeline.
pub mod description;

/// Core domain models: [`DetailLink`](domain::DetailLink) and run reports.
pub mod domain;

/// HTTP fetching behind the [`PageFetcher`](fetcher::PageFetcher) trait.
pub mod fetcher;

/// Gallery listing crawl.
pub mod gallery;

/// Shared HTML helpers.
pub mod html;

/// Hi-res image download.
pub mod images;

/// Numbered artifact files.
pub mod sink;

/// Summarization capability.
///
/// - [`Summarizer`](summarizer::Summarizer): async trait
/// - [`HuggingFaceSummarizer`](summarizer::HuggingFaceSummarizer): hosted model
/// - [`ExtractiveSummarizer`](summarizer::ExtractiveSummarizer): offline fallback
pub mod summarizer;
