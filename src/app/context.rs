use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::app::error::Result;
use crate::captions::CaptionAppender;
use crate::config::Config;
use crate::description::DescriptionPipeline;
use crate::domain::{DetailLink, LinkCollection};
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::gallery::GalleryCrawler;
use crate::images::ImageDownloader;
use crate::sink::FileSink;
use crate::summarizer::{self, Summarizer};

/// Wires configuration, fetchers and the summarizer into the jobs.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn PageFetcher>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(
            config.gallery.timeout(),
            config.gallery.user_agent.as_deref(),
        )?);

        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn crawler(&self) -> Result<GalleryCrawler> {
        GalleryCrawler::new(self.fetcher.clone(), self.config.gallery.clone())
    }

    pub fn description_pipeline(&self) -> Result<DescriptionPipeline> {
        let summarizer = summarizer::from_config(&self.config.summarizer)?;
        self.description_pipeline_with(summarizer)
    }

    pub fn description_pipeline_with(
        &self,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<DescriptionPipeline> {
        let descriptions = &self.config.descriptions;
        let sink = FileSink::create(&descriptions.output_dir, descriptions.file_prefix.as_str())?;

        DescriptionPipeline::new(
            self.fetcher.clone(),
            summarizer,
            sink,
            &self.config.gallery,
            descriptions,
            self.config.summarizer.budget(),
        )
    }

    pub fn image_downloader(&self) -> Result<ImageDownloader> {
        let images = &self.config.images;
        let assets: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(
            images.timeout(),
            self.config.gallery.user_agent.as_deref(),
        )?);
        let sink = FileSink::create(&images.output_dir, images.file_prefix.as_str())?;

        ImageDownloader::new(
            self.fetcher.clone(),
            assets,
            sink,
            &self.config.gallery,
            images,
        )
    }

    pub fn caption_appender(&self) -> CaptionAppender {
        CaptionAppender::new(self.config.captions.trigger.as_str())
    }

    /// Links saved from an earlier crawl, or a fresh crawl.
    pub async fn links(&self, saved: Option<&Path>) -> Result<Vec<DetailLink>> {
        match saved {
            Some(path) => load_links(path),
            None => Ok(self.crawler()?.collect_links().await.links),
        }
    }
}

pub fn save_links(path: &Path, collection: &LinkCollection) -> Result<()> {
    let json = serde_json::to_string_pretty(&collection.links)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_links(path: &Path) -> Result<Vec<DetailLink>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
