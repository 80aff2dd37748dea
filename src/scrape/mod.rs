//! Page fetching
//!
//! Two strategies sit behind [`FetchStrategy`]: a plain HTTP fetch and a
//! headless-browser render. Both pass through [`Politeness`] (robots.txt check
//! plus per-host spacing) before touching the network. The
//! [`FetchOrchestrator`] picks the order and decides when to fall back.

mod governor;
mod lightweight;
mod orchestrator;
mod page;
mod rendered;

pub use governor::RateGovernor;
pub use lightweight::{build_http_client, LightweightStrategy};
pub use orchestrator::{FetchOrchestrator, FetchState};
pub use page::{collapse_whitespace, read_page, PageText};
pub use rendered::{
    ChromeEngine, RenderEngine, RenderLease, RenderOptions, RenderPool, RenderedPage,
    RenderedStrategy,
};

use crate::config::StrategyKind;
use crate::robots::PolicyChecker;
use crate::url::host_key;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Why a single strategy could not produce a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP error: status {0}")]
    Http(u16),

    #[error("render timed out after {0:?}")]
    RenderTimeout(Duration),

    #[error("browser driver error: {0}")]
    Driver(String),

    #[error("disallowed by robots.txt")]
    PolicyDenied,
}

/// One fetched page, as produced by a strategy
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub url: String,
    pub title: String,
    /// Visible text content
    pub content: String,
    /// Raw markup
    pub markup: String,
    pub strategy: StrategyKind,
    pub status_code: u16,
}

impl FetchResult {
    /// Length of the trimmed text content in characters
    pub fn content_len(&self) -> usize {
        self.content.trim().chars().count()
    }
}

/// A way of turning a URL into a [`FetchResult`]
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchFailure>;
}

/// Gate applied by every strategy before a network call
///
/// Holds the shared rate governor and, when enabled, the policy checker. Built
/// once and shared by reference so the per-host state is process-wide without
/// being global.
pub struct Politeness {
    governor: Arc<RateGovernor>,
    policy: Option<Arc<PolicyChecker>>,
    agent: String,
    honor_policy: bool,
}

impl Politeness {
    pub fn new(
        governor: Arc<RateGovernor>,
        policy: Option<Arc<PolicyChecker>>,
        agent: impl Into<String>,
        honor_policy: bool,
    ) -> Self {
        Self {
            governor,
            policy,
            agent: agent.into(),
            honor_policy,
        }
    }

    /// Spacing only, no robots.txt check
    pub fn throttle_only(governor: Arc<RateGovernor>) -> Self {
        Self::new(governor, None, "*", false)
    }

    /// Checks robots.txt advice, then waits for the host's turn
    ///
    /// A disallowed URL is logged and admitted unless the policy is honored.
    pub async fn admit(&self, url: &Url) -> Result<(), FetchFailure> {
        if let Some(policy) = &self.policy {
            if !policy.is_allowed(url, &self.agent).await {
                if self.honor_policy {
                    return Err(FetchFailure::PolicyDenied);
                }
                warn!("robots.txt disallows {}, proceeding", url);
            }
        }

        let host = host_key(url).unwrap_or_default();
        self.governor.await_turn(&host).await;
        Ok(())
    }
}
