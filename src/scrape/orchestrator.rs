//! Strategy selection and fallback
//!
//! ```text
//! TryLightweight ──rich──▶ Done
//!       │ thin / failed
//!       ▼
//! TryRendered ──rich or richer──▶ Done
//!       │ thin / failed
//!       ▼
//!     Failed
//! ```
//!
//! With a rendered-first hint the two strategies swap places. Each strategy
//! runs at most once per fetch.

use crate::config::StrategyKind;
use crate::scrape::{FetchFailure, FetchResult, FetchStrategy};
use crate::LensError;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Position of a fetch in the fallback state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    TryLightweight,
    TryRendered,
    Done,
    Failed,
}

impl FetchState {
    fn trying(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Lightweight => Self::TryLightweight,
            StrategyKind::Rendered => Self::TryRendered,
        }
    }

    /// The strategy this state runs, or None when terminal
    pub fn strategy(self) -> Option<StrategyKind> {
        match self {
            Self::TryLightweight => Some(StrategyKind::Lightweight),
            Self::TryRendered => Some(StrategyKind::Rendered),
            Self::Done | Self::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.strategy().is_none()
    }
}

/// Runs the strategies in order and applies the richness predicate
pub struct FetchOrchestrator {
    lightweight: Arc<dyn FetchStrategy>,
    rendered: Arc<dyn FetchStrategy>,
    min_content_length: usize,
    default_order: StrategyKind,
}

impl FetchOrchestrator {
    pub fn new(
        lightweight: Arc<dyn FetchStrategy>,
        rendered: Arc<dyn FetchStrategy>,
        min_content_length: usize,
        default_order: StrategyKind,
    ) -> Self {
        Self {
            lightweight,
            rendered,
            min_content_length,
            default_order,
        }
    }

    /// Content is rich when its trimmed length exceeds the threshold
    pub fn is_rich(&self, result: &FetchResult) -> bool {
        result.content_len() > self.min_content_length
    }

    /// Fetches `url`, falling back to the other strategy at most once
    ///
    /// `hint` overrides the configured first strategy. The second strategy's
    /// result is accepted when it is rich, or when it carries strictly more
    /// content than anything the first produced. Strategy failures are
    /// collected into [`LensError::FetchFailed`]; a robots.txt denial ends the
    /// fetch immediately.
    pub async fn fetch(&self, url: &Url, hint: Option<StrategyKind>) -> crate::Result<FetchResult> {
        let first = hint.unwrap_or(self.default_order);
        let mut state = FetchState::trying(first);
        let mut attempts = 0;
        let mut best_len = 0;
        let mut accepted = None;
        let mut failures = Vec::new();

        while let Some(kind) = state.strategy() {
            attempts += 1;
            let fallback_run = attempts > 1;

            let strategy = self.strategy(kind);
            let label = strategy.kind().as_str();

            state = match strategy.fetch(url).await {
                Ok(result) => {
                    let len = result.content_len();
                    let rich = self.is_rich(&result);
                    let richer = len > best_len;
                    debug!(
                        "{} fetch of {}: {} chars (rich: {})",
                        label,
                        url,
                        len,
                        rich
                    );

                    if rich || (fallback_run && richer) {
                        accepted = Some(result);
                        FetchState::Done
                    } else {
                        best_len = best_len.max(len);
                        self.after(kind, attempts)
                    }
                }
                Err(FetchFailure::PolicyDenied) => {
                    warn!("Fetch of {} denied by robots.txt", url);
                    return Err(LensError::PolicyDenied {
                        url: url.to_string(),
                    });
                }
                Err(failure) => {
                    warn!("{} fetch of {} failed: {}", label, url, failure);
                    failures.push(failure);
                    self.after(kind, attempts)
                }
            };
        }

        match accepted {
            Some(result) => {
                info!(
                    "Fetched {} with {} strategy ({} chars)",
                    url,
                    result.strategy.as_str(),
                    result.content_len()
                );
                Ok(result)
            }
            None => Err(LensError::FetchFailed {
                url: url.to_string(),
                failures,
            }),
        }
    }

    fn after(&self, kind: StrategyKind, attempts: usize) -> FetchState {
        if attempts >= 2 {
            FetchState::Failed
        } else {
            FetchState::trying(kind.other())
        }
    }

    fn strategy(&self, kind: StrategyKind) -> &Arc<dyn FetchStrategy> {
        match kind {
            StrategyKind::Lightweight => &self.lightweight,
            StrategyKind::Rendered => &self.rendered,
        }
    }
}
