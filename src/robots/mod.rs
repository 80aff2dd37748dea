//! Robots.txt handling module
//!
//! Fetches, parses and caches robots.txt per host and answers "may this agent
//! fetch this URL". Lookup failures fail open: a host whose robots.txt cannot be
//! retrieved is treated as allowing everything, and the failure is not cached so
//! a later lookup retries.

mod cache;
mod parser;

pub use cache::CachedRobots;
pub use parser::ParsedRobots;

use crate::url::{host_key, robots_url};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Reasons a robots.txt lookup produced no usable answer
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("URL has no host: {0}")]
    NoHost(String),

    #[error("robots.txt request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("robots.txt server error: HTTP {0}")]
    ServerError(u16),
}

/// Fetches robots.txt for the host of `url`
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - Rules from a 2xx response, or allow-all for a 4xx
/// * `Err(RobotsError)` - Transport failure or 5xx; the caller decides how to degrade
pub async fn fetch_robots(client: &Client, url: &Url) -> Result<ParsedRobots, RobotsError> {
    let robots = robots_url(url).ok_or_else(|| RobotsError::NoHost(url.to_string()))?;

    let response = client.get(robots.as_str()).send().await?;
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        Ok(ParsedRobots::from_content(&body))
    } else if status.is_client_error() {
        debug!("No robots.txt at {} (HTTP {})", robots, status.as_u16());
        Ok(ParsedRobots::allow_all())
    } else {
        Err(RobotsError::ServerError(status.as_u16()))
    }
}

/// Answers robots.txt questions with a per-host cache
///
/// The cache only grows. Once a host's rules are stored they are reused for
/// the life of the checker.
pub struct PolicyChecker {
    client: Client,
    cache: RwLock<HashMap<String, Arc<CachedRobots>>>,
}

impl PolicyChecker {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Checks whether `agent` may fetch `url`
    ///
    /// Never fails: an unreachable or broken robots.txt yields `true`.
    pub async fn is_allowed(&self, url: &Url, agent: &str) -> bool {
        let Some(host) = host_key(url) else {
            warn!("Cannot check robots.txt for {}: no host", url);
            return true;
        };

        if let Some(cached) = self.cached(&host) {
            return cached.is_allowed(url.as_str(), agent);
        }

        match fetch_robots(&self.client, url).await {
            Ok(rules) => {
                let entry = self.store(host, rules);
                entry.is_allowed(url.as_str(), agent)
            }
            Err(e) => {
                warn!("robots.txt lookup for {} failed, allowing: {}", host, e);
                true
            }
        }
    }

    /// Number of hosts with cached rules
    pub fn cached_hosts(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn cached(&self, host: &str) -> Option<Arc<CachedRobots>> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(host)
            .cloned()
    }

    /// Stores rules for a host; the first writer for a host wins
    fn store(&self, host: String, rules: ParsedRobots) -> Arc<CachedRobots> {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache
            .entry(host.clone())
            .or_insert_with(|| Arc::new(CachedRobots::new(host, rules)))
            .clone()
    }
}
