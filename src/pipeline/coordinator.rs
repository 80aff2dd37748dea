//! Profile service - request handling from URL to stored record
//!
//! One call to [`ProfileService::scrape`] runs the whole flow for one profile:
//! - validate the URL before anything touches the network
//! - fetch through the orchestrator (policy gate, spacing, fallback)
//! - extract the record and persist it
//! - hand the record to the background analysis queue
//!
//! Batches run their items concurrently under the same in-flight limit as
//! single requests, and isolate per-item failures.

use crate::analysis::Analyzer;
use crate::config::{Config, StrategyKind};
use crate::extract::Extractor;
use crate::model::{AnalysisResult, ProfileRecord};
use crate::output::{self, Export, ExportFormat};
use crate::pipeline::queue::AnalysisQueue;
use crate::robots::PolicyChecker;
use crate::scrape::{
    build_http_client, FetchOrchestrator, LightweightStrategy, Politeness, RateGovernor,
    RenderOptions, RenderPool, RenderedStrategy,
};
use crate::storage::{open_store, DocumentKind, ProfileStore};
use crate::url::ProfileUrl;
use crate::{LensError, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Result of a successful scrape
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub status: &'static str,
    pub data: ProfileRecord,
    pub analysis_queued: bool,
}

/// Failure of a request, in the same shape callers get for successes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub kind: &'static str,
    pub error: String,
}

impl From<&LensError> for ErrorResponse {
    fn from(error: &LensError) -> Self {
        Self {
            status: "error",
            kind: error.kind(),
            error: error.to_string(),
        }
    }
}

/// One item of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub url: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ProfileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub analysis_queued: bool,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}

/// Aggregate result of a batch, entries in input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub entries: Vec<BatchEntry>,
}

/// Fetch, extract, persist and analyze profiles
pub struct ProfileService {
    config: Arc<Config>,
    orchestrator: FetchOrchestrator,
    extractor: Extractor,
    analyzer: Arc<Analyzer>,
    store: Arc<dyn ProfileStore>,
    queue: AnalysisQueue,
    in_flight: Semaphore,
    render_pool: Option<Arc<RenderPool>>,
}

impl ProfileService {
    /// Builds the full stack described by `config`
    ///
    /// Must be called from within a Tokio runtime (the analysis worker is
    /// spawned here). Browsers are not launched until the first rendered fetch.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = &config.fetcher;
        let client = build_http_client(fetcher)?;

        let governor = Arc::new(RateGovernor::from_millis(
            fetcher.min_delay_ms,
            fetcher.max_delay_ms,
        ));
        let policy = fetcher
            .check_robots
            .then(|| Arc::new(PolicyChecker::new(client.clone())));
        let politeness = Arc::new(Politeness::new(
            governor,
            policy,
            fetcher.policy_agent.clone(),
            fetcher.honor_robots,
        ));

        let pool = Arc::new(RenderPool::chrome(&config.render));
        let lightweight = Arc::new(LightweightStrategy::new(client, politeness.clone()));
        let rendered = Arc::new(RenderedStrategy::new(
            pool.clone(),
            politeness,
            RenderOptions::from_config(fetcher, &config.render),
        ));
        let orchestrator = FetchOrchestrator::new(
            lightweight,
            rendered,
            fetcher.min_content_length,
            fetcher.default_strategy,
        );

        let store = open_store(&config.storage)?;
        let mut service = Self::with_components(config, orchestrator, store);
        service.render_pool = Some(pool);
        Ok(service)
    }

    /// Builds a service around an existing orchestrator and store
    pub fn with_components(
        config: Config,
        orchestrator: FetchOrchestrator,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        let analyzer = Arc::new(Analyzer::new(config.analyzer.clone()));
        let queue = AnalysisQueue::start(
            analyzer.clone(),
            store.clone(),
            config.pipeline.analysis_queue_depth,
        );

        Self {
            extractor: Extractor::new(config.extractor.clone()),
            in_flight: Semaphore::new(config.pipeline.max_concurrent_requests.max(1)),
            config: Arc::new(config),
            orchestrator,
            analyzer,
            store,
            queue,
            render_pool: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Scrapes one profile and queues it for analysis
    ///
    /// Invalid URLs are rejected before any network activity.
    pub async fn scrape(&self, raw_url: &str, hint: Option<StrategyKind>) -> Result<ScrapeOutcome> {
        let url = ProfileUrl::parse(raw_url)?;

        // The semaphore is owned here and never closed
        let _permit = self.in_flight.acquire().await.ok();

        info!("Scraping profile {}", url);
        let page = self.orchestrator.fetch(url.as_url(), hint).await?;

        let record = self
            .extractor
            .extract(&page)
            .ok_or_else(|| LensError::ExtractionFailed {
                url: url.to_string(),
            })?;

        self.store.put_profile(&record)?;
        let analysis_queued = self.queue.submit(record.clone());

        info!(
            "Stored profile {} ({} experience, {} skills)",
            record.profile_id,
            record.experience.len(),
            record.skills.len()
        );

        Ok(ScrapeOutcome {
            status: "success",
            data: record,
            analysis_queued,
        })
    }

    /// Scrapes up to `max-batch-size` profiles concurrently
    ///
    /// An oversized batch is rejected before any fetch. Each item succeeds or
    /// fails on its own.
    pub async fn batch(&self, urls: &[String]) -> Result<BatchReport> {
        let max = self.config.pipeline.max_batch_size;
        if urls.len() > max {
            return Err(LensError::BatchTooLarge {
                size: urls.len(),
                max,
            });
        }

        info!("Processing batch of {} profiles", urls.len());
        let outcomes = join_all(urls.iter().map(|url| self.scrape(url, None))).await;

        let entries: Vec<BatchEntry> = urls
            .iter()
            .zip(outcomes)
            .map(|(url, outcome)| match outcome {
                Ok(outcome) => BatchEntry {
                    url: url.clone(),
                    status: "success",
                    data: Some(outcome.data),
                    kind: None,
                    error: None,
                    analysis_queued: outcome.analysis_queued,
                },
                Err(e) => {
                    warn!("Batch item {} failed: {}", url, e);
                    let response = ErrorResponse::from(&e);
                    BatchEntry {
                        url: url.clone(),
                        status: response.status,
                        data: None,
                        kind: Some(response.kind),
                        error: Some(response.error),
                        analysis_queued: false,
                    }
                }
            })
            .collect();

        let successful = entries.iter().filter(|e| e.is_success()).count();
        info!(
            "Batch finished: {} succeeded, {} failed",
            successful,
            entries.len() - successful
        );

        Ok(BatchReport {
            total: entries.len(),
            successful,
            failed: entries.len() - successful,
            entries,
        })
    }

    pub fn profile(&self, profile_id: &str) -> Result<ProfileRecord> {
        self.store
            .get_profile(profile_id)?
            .ok_or_else(|| LensError::ProfileNotFound(profile_id.to_string()))
    }

    /// Stored analysis, if the background worker (or [`analyze`](Self::analyze)) produced one
    pub fn stored_analysis(&self, profile_id: &str) -> Result<Option<AnalysisResult>> {
        Ok(self.store.get_analysis(profile_id)?)
    }

    pub fn profile_ids(&self) -> Result<Vec<String>> {
        Ok(self.store.list_ids(DocumentKind::Profile)?)
    }

    /// Analyzes a stored record now and persists the result
    pub fn analyze(&self, profile_id: &str) -> Result<AnalysisResult> {
        let record = self.profile(profile_id)?;
        let analysis = self.analyzer.analyze(&record);
        self.store.put_analysis(&analysis)?;
        info!(
            "Analyzed {}: {} with competitiveness {}",
            profile_id, analysis.career_level, analysis.market_competitiveness_score
        );
        Ok(analysis)
    }

    /// Renders an export of stored profiles
    ///
    /// JSON and HTML take exactly the first id; CSV takes all of them. HTML
    /// needs an analysis and computes one when none is stored.
    pub fn export(
        &self,
        profile_ids: &[String],
        format: ExportFormat,
        now: DateTime<Utc>,
    ) -> Result<Export> {
        let first = profile_ids
            .first()
            .ok_or_else(|| LensError::ProfileNotFound(String::new()))?;

        let export = match format {
            ExportFormat::Json => {
                let record = self.profile(first)?;
                let analysis = self.stored_analysis(first)?;
                output::export_json(&record, analysis.as_ref(), now)?
            }
            ExportFormat::Csv => {
                let mut rows = Vec::with_capacity(profile_ids.len());
                for id in profile_ids {
                    rows.push((self.profile(id)?, self.stored_analysis(id)?));
                }
                output::export_csv(&rows, now)?
            }
            ExportFormat::Html => {
                let record = self.profile(first)?;
                let analysis = match self.stored_analysis(first)? {
                    Some(analysis) => analysis,
                    None => self.analyzer.analyze_at(&record, now),
                };
                output::export_html_report(&record, &analysis, now)
            }
        };

        Ok(export)
    }

    /// Renders an export and writes it into the configured export directory
    pub fn save_export(&self, profile_ids: &[String], format: ExportFormat) -> Result<PathBuf> {
        let export = self.export(profile_ids, format, Utc::now())?;
        let path = output::write_export(Path::new(&self.config.output.export_dir), &export)?;
        Ok(path)
    }

    /// Drains the analysis queue and closes any launched browsers
    pub async fn shutdown(self) {
        self.queue.shutdown().await;
        if let Some(pool) = &self.render_pool {
            pool.shutdown();
        }
    }
}
