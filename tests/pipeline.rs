use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use satcap::app::{AppContext, Result, SatcapError};
use satcap::config::Config;
use satcap::domain::{DetailLink, ItemOutcome};
use satcap::fetcher::PageFetcher;
use satcap::summarizer::{LengthBudget, Summarizer};

const BASE: &str = "http://gallery.test";

/// Serves canned bodies; unknown URLs answer 500.
#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    fn page(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(format!("{BASE}{path}"), body.into());
        self
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| SatcapError::Status {
                url: url.to_string(),
                status: 500,
            })
    }
}

/// Returns a fixed reply and counts invocations.
struct CountingSummarizer {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl CountingSummarizer {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize(&self, _text: &str, _budget: LengthBudget) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(SatcapError::Summarizer)
    }
}

fn config(out: &Path, pages: usize) -> Config {
    let mut config = Config::default();
    config.gallery.base_url = BASE.to_string();
    config.gallery.listing_path = "/gallery/{offset}".to_string();
    config.gallery.pages = pages;
    config.gallery.page_size = 3;
    config.gallery.delay_ms = 0;
    config.descriptions.output_dir = out.join("esa_description");
    config.images.output_dir = out.join("esa_images");
    config
}

fn listing(hrefs: &[&str]) -> String {
    hrefs
        .iter()
        .map(|h| format!(r#"<div class="grid-item image"><a href="{h}"><img></a></div>"#))
        .collect()
}

fn detail(paragraphs: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!(r#"<html><body><div class="modal__tab-description">{body}</div></body></html>"#)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_failed_gallery_page_then_three_descriptions() {
    let tmp = TempDir::new().unwrap();
    // Page 0 (offset 0) is missing and fails; page 1 (offset 3) succeeds.
    let fetcher = FakeFetcher::default()
        .page("/gallery/3", listing(&["/img/a", "/img/b", "/img/c"]))
        .page("/img/a", detail(&["The Nile delta."]))
        .page("/img/b", detail(&["Lena river in winter."]))
        .page("/img/c", detail(&["Dunes of the Sahara."]));

    let ctx = AppContext::with_fetcher(config(tmp.path(), 2), Arc::new(fetcher));
    let summarizer = CountingSummarizer::replying("A View From Orbit");

    let collection = ctx.crawler().unwrap().collect_links().await;
    let hrefs: Vec<_> = collection.links.iter().map(DetailLink::href).collect();
    assert_eq!(hrefs, vec!["/img/a", "/img/b", "/img/c"]);
    assert_eq!(collection.failed_pages().count(), 1);

    let pipeline = ctx.description_pipeline_with(summarizer.clone()).unwrap();
    let report = pipeline.run(&collection.links).await;

    assert_eq!(report.written(), 3);
    assert_eq!(summarizer.calls(), 3);

    let out = tmp.path().join("esa_description");
    assert_eq!(
        file_names(&out),
        vec!["desc_0001.txt", "desc_0002.txt", "desc_0003.txt"]
    );
    assert_eq!(
        fs::read_to_string(out.join("desc_0002.txt")).unwrap(),
        "a view from orbit"
    );
}

#[tokio::test]
async fn test_empty_description_uses_fallback_without_summarizer() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default()
        .page("/img/empty", "<html><body><div class=\"other\"><p>x</p></div></body></html>")
        .page("/img/blank", detail(&["   "]));

    let ctx = AppContext::with_fetcher(config(tmp.path(), 0), Arc::new(fetcher));
    let summarizer = CountingSummarizer::replying("unused");
    let pipeline = ctx.description_pipeline_with(summarizer.clone()).unwrap();

    let links = vec![DetailLink::new("/img/empty"), DetailLink::new("/img/blank")];
    let report = pipeline.run(&links).await;

    assert_eq!(report.written(), 2);
    assert_eq!(summarizer.calls(), 0);

    let out = tmp.path().join("esa_description");
    for name in ["desc_0001.txt", "desc_0002.txt"] {
        assert_eq!(
            fs::read_to_string(out.join(name)).unwrap(),
            "no description available"
        );
    }
}

#[tokio::test]
async fn test_summary_is_lowercase_trimmed_and_bounded() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default().page("/img/a", detail(&["Long text."]));

    let mut config = config(tmp.path(), 0);
    config.summarizer.max_length = 8;
    let ctx = AppContext::with_fetcher(config, Arc::new(fetcher));

    let long_reply = format!("  {}  \n", "Sentinel IMAGERY ".repeat(10));
    let pipeline = ctx
        .description_pipeline_with(CountingSummarizer::replying(&long_reply))
        .unwrap();

    pipeline.run(&[DetailLink::new("/img/a")]).await;

    let text =
        fs::read_to_string(tmp.path().join("esa_description").join("desc_0001.txt")).unwrap();
    assert_eq!(text, text.to_lowercase());
    assert_eq!(text, text.trim());
    assert!(text.split_whitespace().count() <= 8);
    assert!(text.starts_with("sentinel imagery"));
}

#[tokio::test(start_paused = true)]
async fn test_detail_requests_are_spaced_by_delay() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default()
        .page("/img/a", detail(&["Ice shelf."]))
        .page("/img/c", detail(&["Salt flats."]));

    let mut config = config(tmp.path(), 0);
    config.gallery.delay_ms = 1500;
    let ctx = AppContext::with_fetcher(config, Arc::new(fetcher));
    let pipeline = ctx
        .description_pipeline_with(CountingSummarizer::replying("a view"))
        .unwrap();

    // The failing middle item still waits its turn.
    let links = vec![
        DetailLink::new("/img/a"),
        DetailLink::new("/img/missing"),
        DetailLink::new("/img/c"),
    ];
    let start = tokio::time::Instant::now();
    let report = pipeline.run(&links).await;

    assert_eq!(report.written(), 2);
    assert_eq!(start.elapsed(), std::time::Duration::from_millis(3000));
}

#[tokio::test]
async fn test_files_numbered_by_successful_item() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default()
        .page("/img/a", detail(&["first"]))
        .page("/img/c", detail(&["third"]));

    let ctx = AppContext::with_fetcher(config(tmp.path(), 0), Arc::new(fetcher));
    let pipeline = ctx
        .description_pipeline_with(CountingSummarizer::replying("ok"))
        .unwrap();

    let links = vec![
        DetailLink::new("/img/a"),
        DetailLink::new("/img/missing"),
        DetailLink::new("/img/c"),
    ];
    let report = pipeline.run(&links).await;

    assert_eq!(report.written(), 2);
    assert_eq!(report.skipped(), 1);

    match &report.items[2] {
        ItemOutcome::Written { index, url, path } => {
            assert_eq!(*index, 2);
            assert_eq!(url, "http://gallery.test/img/c");
            assert_eq!(path.file_name().unwrap(), "desc_0002.txt");
        }
        other => panic!("expected written item, got {:?}", other),
    }
    assert!(matches!(
        &report.items[1],
        ItemOutcome::Skipped { url, .. } if url == "http://gallery.test/img/missing"
    ));
}

#[tokio::test]
async fn test_summarizer_failure_skips_item() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default()
        .page("/img/a", detail(&["text"]))
        .page("/img/b", detail(&[]));

    let ctx = AppContext::with_fetcher(config(tmp.path(), 0), Arc::new(fetcher));
    let pipeline = ctx
        .description_pipeline_with(CountingSummarizer::failing("model is loading"))
        .unwrap();

    let report = pipeline
        .run(&[DetailLink::new("/img/a"), DetailLink::new("/img/b")])
        .await;

    assert_eq!(report.written(), 1);
    match &report.items[0] {
        ItemOutcome::Skipped { reason, .. } => assert!(reason.contains("model is loading")),
        other => panic!("expected skipped item, got {:?}", other),
    }
    assert_eq!(
        file_names(&tmp.path().join("esa_description")),
        vec!["desc_0001.txt"]
    );
}

#[tokio::test]
async fn test_trigger_appended_to_generated_captions_once() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default().page("/img/a", detail(&["River."]));

    let mut config = config(tmp.path(), 0);
    config.captions.dir = tmp.path().join("esa_description");
    let ctx = AppContext::with_fetcher(config, Arc::new(fetcher));

    ctx.description_pipeline_with(CountingSummarizer::replying("A River Delta"))
        .unwrap()
        .run(&[DetailLink::new("/img/a")])
        .await;

    let appender = ctx.caption_appender();
    let dir = &ctx.config.captions.dir;
    let caption = dir.join("desc_0001.txt");

    appender.append_all(dir).unwrap();
    assert_eq!(
        fs::read_to_string(&caption).unwrap(),
        "a river delta, sat-art style"
    );

    let second = appender.append_all(dir).unwrap();
    assert_eq!(second.already_present(), 1);
    assert_eq!(
        fs::read_to_string(&caption).unwrap(),
        "a river delta, sat-art style"
    );
}

#[tokio::test]
async fn test_hi_res_images_downloaded() {
    let tmp = TempDir::new().unwrap();
    let fetcher = Arc::new(
        FakeFetcher::default()
            .page(
                "/img/a",
                r#"<div class="dropdown">
                     <a href="/storage/a_small.jpg" title="Low-res">s</a>
                     <a href="/storage/a.png" title="HI-RES PNG">h</a>
                   </div>"#,
            )
            .page("/img/b", "<div class=\"dropdown\"></div>")
            .page("/storage/a.png", vec![1u8, 2, 3]),
    );

    let ctx = AppContext::with_fetcher(config(tmp.path(), 0), fetcher.clone());
    let downloader = satcap::images::ImageDownloader::new(
        fetcher.clone(),
        fetcher,
        satcap::sink::FileSink::create(&ctx.config.images.output_dir, "image_").unwrap(),
        &ctx.config.gallery,
        &ctx.config.images,
    )
    .unwrap();

    let report = downloader
        .run(&[DetailLink::new("/img/b"), DetailLink::new("/img/a")])
        .await;

    assert_eq!(report.written(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(
        fs::read(tmp.path().join("esa_images").join("image_0001.png")).unwrap(),
        vec![1, 2, 3]
    );
}
