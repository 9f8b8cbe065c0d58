use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::app::{Result, SatcapError};
use crate::summarizer::{LengthBudget, Summarizer, SummarizerConfig};

/// Summarizer backed by a hosted summarization pipeline
/// (Hugging Face Inference API request/response shape).
pub struct HuggingFaceSummarizer {
    client: Client,
    config: SummarizerConfig,
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    inputs: &'a str,
    parameters: SummaryParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct SummaryParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HuggingFaceSummarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        info!(
            "Initializing summarizer: endpoint={}, model={}",
            config.endpoint, config.model
        );

        let mut headers = HeaderMap::new();

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("HF_TOKEN").ok());

        if let Some(key) = &api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| SatcapError::Config(format!("Invalid API key format: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        } else {
            warn!("No API key provided for {}", config.endpoint);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    fn parse_response(body: &[u8]) -> Result<String> {
        let mut summaries: Vec<SummaryResponse> = serde_json::from_slice(body)?;
        if summaries.len() != 1 {
            return Err(SatcapError::Summarizer(format!(
                "expected one summary, got {}",
                summaries.len()
            )));
        }
        Ok(summaries.remove(0).summary_text)
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String> {
        let request = SummaryRequest {
            inputs: text,
            parameters: SummaryParameters {
                min_length: budget.min,
                max_length: budget.max,
                do_sample: false,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        debug!(
            "Sending {} chars to {} for summarization",
            text.len(),
            self.config.endpoint
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(SatcapError::Summarizer(format!(
                "{} returned {}: {}",
                self.config.endpoint, status, message
            )));
        }

        Self::parse_response(&body)
    }
}
