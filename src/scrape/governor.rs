//! Per-host request spacing
//!
//! Each host gets its own async lock around a [`HostState`]. Callers for the
//! same host queue on that lock, so turns for one host are strictly serialized
//! while different hosts proceed independently.

use crate::state::HostState;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

/// Enforces a randomized minimum interval between requests to one host
pub struct RateGovernor {
    min_delay: Duration,
    max_delay: Duration,
    hosts: Mutex<HashMap<String, Arc<AsyncMutex<HostState>>>>,
}

impl RateGovernor {
    /// Creates a governor with the given delay bounds
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        let (min_delay, max_delay) = if min_delay <= max_delay {
            (min_delay, max_delay)
        } else {
            (max_delay, min_delay)
        };

        Self {
            min_delay,
            max_delay,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Waits until `host` may be contacted again, then claims the turn
    ///
    /// Samples a delay in `[min, max]`, sleeps until that long has passed since
    /// the host's last turn, stamps now and bumps the counter. A host with no
    /// history goes immediately. If the returned future is dropped while
    /// waiting, no turn is recorded.
    pub async fn await_turn(&self, host: &str) {
        let required = self.sample_delay();
        let slot = self.slot(host);

        let mut state = slot.lock().await;
        if let Some(wait) = state.time_until_ready(required, Instant::now()) {
            debug!("Rate limiting {}: waiting {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }
        state.record_request(Instant::now());
    }

    /// Number of turns granted to `host` so far
    pub async fn request_count(&self, host: &str) -> u64 {
        let slot = {
            let hosts = self.hosts.lock().unwrap_or_else(|e| e.into_inner());
            hosts.get(host).cloned()
        };
        match slot {
            Some(slot) => slot.lock().await.request_count,
            None => 0,
        }
    }

    fn sample_delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        rand::thread_rng().gen_range(self.min_delay..=self.max_delay)
    }

    fn slot(&self, host: &str) -> Arc<AsyncMutex<HostState>> {
        let mut hosts = self.hosts.lock().unwrap_or_else(|e| e.into_inner());
        hosts
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(HostState::new())))
            .clone()
    }
}
