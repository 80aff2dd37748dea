use std::time::{Duration, Instant};

/// Politeness state for one remote host
///
/// Holds only what the rate governor needs: when the host was last given a
/// turn and how many turns it has had. Absence of a previous request means the
/// next one may go immediately.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Number of requests permitted against this host
    pub request_count: u64,

    /// When the last request against this host was permitted
    pub last_request_time: Option<Instant>,
}

impl HostState {
    /// Creates a new HostState with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates how long to wait before the next request
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_ready(&self, required: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < required {
            Some(required - elapsed)
        } else {
            None
        }
    }

    /// Records that a request was permitted
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }
}
