//! Plain HTTP fetch strategy
//!
//! Sends a single GET with a browser-like header set and reads the response
//! body as the page. No JavaScript runs, so pages that render client-side
//! come back thin and the orchestrator falls back.

use crate::config::{FetcherConfig, StrategyKind};
use crate::scrape::{read_page, FetchFailure, FetchResult, FetchStrategy, Politeness};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Builds the HTTP client used for page and robots.txt requests
///
/// # Arguments
///
/// * `config` - The fetcher configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use profile_lens::config::FetcherConfig;
/// use profile_lens::scrape::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page with one HTTP GET
pub struct LightweightStrategy {
    client: Client,
    politeness: Arc<Politeness>,
}

impl LightweightStrategy {
    pub fn new(client: Client, politeness: Arc<Politeness>) -> Self {
        Self { client, politeness }
    }
}

#[async_trait]
impl FetchStrategy for LightweightStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Lightweight
    }

    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchFailure> {
        self.politeness.admit(url).await?;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!("Lightweight fetch of {} returned {}", url, status);
            return Err(FetchFailure::Http(status.as_u16()));
        }

        let markup = response.text().await.map_err(classify_error)?;
        let page = read_page(&markup);

        Ok(FetchResult {
            url: url.to_string(),
            title: page.title,
            content: page.text,
            markup,
            strategy: StrategyKind::Lightweight,
            status_code: status.as_u16(),
        })
    }
}

fn classify_error(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Transport("request timed out".to_string())
    } else if error.is_connect() {
        FetchFailure::Transport(format!("connection failed: {}", error))
    } else {
        FetchFailure::Transport(error.to_string())
    }
}
