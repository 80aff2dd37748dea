//! Per-host policy cache entries
//!
//! Entries are written once per host and never invalidated in-process; a new
//! process fetches robots.txt again.

use crate::robots::ParsedRobots;
use chrono::{DateTime, Utc};

/// Cached robots.txt data for a host
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// Host key the rules belong to
    pub host: String,

    /// The parsed robots.txt content
    pub rules: ParsedRobots,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new entry stamped with the current time
    pub fn new(host: impl Into<String>, rules: ParsedRobots) -> Self {
        Self {
            host: host.into(),
            rules,
            fetched_at: Utc::now(),
        }
    }

    /// Checks if a URL is allowed according to the cached rules
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        self.rules.is_allowed(url, user_agent)
    }
}
