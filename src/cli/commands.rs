use std::path::Path;

use crate::app::context::save_links;
use crate::app::{AppContext, Result};
use crate::captions::{CaptionAppender, CaptionOutcome};
use crate::config::Config;
use crate::domain::{ItemOutcome, PageResult, RunReport};

pub async fn collect_links(ctx: &AppContext, save: Option<&Path>) -> Result<()> {
    let collection = ctx.crawler()?.collect_links().await;

    for page in &collection.pages {
        if let PageResult::Failed { reason } = &page.result {
            eprintln!("  Could not fetch gallery page {}: {}", page.page + 1, reason);
        }
    }

    println!(
        "Found {} detail pages ({} of {} gallery pages failed)",
        collection.links.len(),
        collection.failed_pages().count(),
        collection.pages.len()
    );

    if let Some(path) = save {
        save_links(path, &collection)?;
        println!("Saved links to {}", path.display());
    }

    Ok(())
}

pub async fn describe(ctx: &AppContext, from: Option<&Path>) -> Result<()> {
    let pipeline = ctx.description_pipeline()?;
    let links = ctx.links(from).await?;

    if links.is_empty() {
        println!("No detail pages to describe");
        return Ok(());
    }

    println!("Describing {} detail pages...", links.len());
    let report = pipeline.run(&links).await;
    print_report("descriptions", &report);

    Ok(())
}

pub async fn download_images(ctx: &AppContext, from: Option<&Path>) -> Result<()> {
    let downloader = ctx.image_downloader()?;
    let links = ctx.links(from).await?;

    if links.is_empty() {
        println!("No detail pages to download");
        return Ok(());
    }

    println!("Downloading images for {} detail pages...", links.len());
    let report = downloader.run(&links).await;
    print_report("images", &report);

    Ok(())
}

pub fn add_trigger(ctx: &AppContext, dir: Option<&Path>, trigger: Option<&str>) -> Result<()> {
    let dir = dir.unwrap_or(ctx.config.captions.dir.as_path());
    let appender = match trigger {
        Some(t) => CaptionAppender::new(t),
        None => ctx.caption_appender(),
    };

    let report = appender.append_all(dir)?;

    for (path, outcome) in &report.files {
        if let CaptionOutcome::Failed { reason } = outcome {
            eprintln!("  Could not process {}: {}", path.display(), reason);
        }
    }

    println!(
        "Processing complete: {} added, {} already had the trigger, {} failed",
        report.added(),
        report.already_present(),
        report.failed()
    );

    Ok(())
}

pub fn init_config(path: Option<&Path>) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_config_path()?,
    };

    if path.exists() {
        println!("Config already exists: {}", path.display());
    } else {
        Config::create_default_config(&path)?;
        println!("Wrote default config to {}", path.display());
    }

    Ok(())
}

fn print_report(what: &str, report: &RunReport) {
    for item in &report.items {
        if let ItemOutcome::Skipped { url, reason } = item {
            eprintln!("  Skipped {}: {}", url, reason);
        }
    }

    println!(
        "Saved {} {}, skipped {} ({}s)",
        report.written(),
        what,
        report.skipped(),
        report.elapsed_secs()
    );
}
