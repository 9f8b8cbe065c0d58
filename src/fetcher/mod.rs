pub mod http_fetcher;

pub use http_fetcher::HttpFetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Fetches the raw body of a page.
///
/// Implementations must fail on transport errors, timeouts and non-2xx
/// statuses so callers can skip the page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
