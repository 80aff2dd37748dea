//! Background analysis handoff
//!
//! Scrapes hand extracted records to a bounded queue and return immediately.
//! One worker task analyzes each record and persists the result; failures are
//! logged, never propagated back to the submitter.

use crate::analysis::Analyzer;
use crate::model::ProfileRecord;
use crate::storage::ProfileStore;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub struct AnalysisQueue {
    sender: mpsc::Sender<ProfileRecord>,
    worker: JoinHandle<()>,
}

impl AnalysisQueue {
    /// Spawns the worker; must be called from within a Tokio runtime
    pub fn start(analyzer: Arc<Analyzer>, store: Arc<dyn ProfileStore>, depth: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<ProfileRecord>(depth.max(1));

        let worker = tokio::spawn(async move {
            while let Some(record) = receiver.recv().await {
                let analysis = analyzer.analyze(&record);
                match store.put_analysis(&analysis) {
                    Ok(()) => debug!(
                        "Stored analysis for {} ({}, confidence {:.2})",
                        record.profile_id, analysis.career_level, analysis.confidence
                    ),
                    Err(e) => error!("Failed to store analysis for {}: {}", record.profile_id, e),
                }
            }
            debug!("Analysis queue drained");
        });

        Self { sender, worker }
    }

    /// Queues a record for analysis
    ///
    /// Returns false when the queue is full or closed; the record is then not
    /// analyzed in the background.
    pub fn submit(&self, record: ProfileRecord) -> bool {
        match self.sender.try_send(record) {
            Ok(()) => true,
            Err(TrySendError::Full(record)) => {
                warn!("Analysis queue full, not queueing {}", record.profile_id);
                false
            }
            Err(TrySendError::Closed(record)) => {
                error!("Analysis queue closed, dropping {}", record.profile_id);
                false
            }
        }
    }

    /// Stops accepting work and waits for queued records to be analyzed
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(e) = self.worker.await {
            error!("Analysis worker ended abnormally: {}", e);
        } else {
            info!("Analysis queue shut down");
        }
    }
}
