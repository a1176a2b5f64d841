//! Process-wide request statistics.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How many recent latency samples the rolling window keeps.
pub const RECENT_LATENCY_CAPACITY: usize = 1000;

/// Shared request counters.
///
/// One instance is constructed at startup and handed to every handler by
/// `Arc` (no ambient globals). All mutation happens under a single lock so
/// reads and appends never interleave; the critical sections are a few
/// instructions each and never block on I/O.
#[derive(Debug)]
pub struct ServerStats {
    inner: Mutex<StatsInner>,
    started_at: Instant,
}

#[derive(Debug, Default)]
struct StatsInner {
    total_requests: u64,
    recent_latencies: VecDeque<u64>,
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    /// Arithmetic mean over the rolling window; 0.0 when the window is empty.
    pub average_latency_ms: f64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StatsInner {
                total_requests: 0,
                recent_latencies: VecDeque::with_capacity(RECENT_LATENCY_CAPACITY),
            }),
            started_at: Instant::now(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StatsInner> {
        // A panic while holding the lock cannot corrupt plain counters, so a
        // poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a latency sample, evicting the oldest once the window is full.
    pub fn record_latency(&self, latency_ms: u64) {
        let mut inner = self.lock();
        if inner.recent_latencies.len() == RECENT_LATENCY_CAPACITY {
            inner.recent_latencies.pop_front();
        }
        inner.recent_latencies.push_back(latency_ms);
    }

    pub fn increment_total(&self) {
        self.lock().total_requests += 1;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.lock();
        let average_latency_ms = if inner.recent_latencies.is_empty() {
            0.0
        } else {
            let sum: u64 = inner.recent_latencies.iter().sum();
            sum as f64 / inner.recent_latencies.len() as f64
        };

        StatsSnapshot {
            total_requests: inner.total_requests,
            average_latency_ms,
        }
    }

    /// Time elapsed since this instance was constructed at process startup.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
