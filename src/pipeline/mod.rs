//! Request pipeline: URL validation, fetch, extraction, persistence and
//! background analysis

mod coordinator;
mod queue;

pub use coordinator::{BatchEntry, BatchReport, ErrorResponse, ProfileService, ScrapeOutcome};
pub use queue::AnalysisQueue;
