//! Publisher counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Publisher metrics
#[derive(Debug, Default)]
pub struct PublisherMetrics {
    pub events_enqueued: AtomicU64,
    pub events_sent: AtomicU64,
    /// Evicted or rejected by the rate governor
    pub governor_dropped: AtomicU64,
    pub send_failures: AtomicU64,
    pub connect_attempts: AtomicU64,
}

/// Point-in-time copy of [`PublisherMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublisherMetricsSnapshot {
    pub events_enqueued: u64,
    pub events_sent: u64,
    pub governor_dropped: u64,
    pub send_failures: u64,
    pub connect_attempts: u64,
}

impl PublisherMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_enqueued(&self) {
        self.events_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self) {
        self.events_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_governor_drop(&self) {
        self.governor_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_connect_attempt(&self) {
        self.connect_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PublisherMetricsSnapshot {
        PublisherMetricsSnapshot {
            events_enqueued: self.events_enqueued.load(Ordering::Relaxed),
            events_sent: self.events_sent.load(Ordering::Relaxed),
            governor_dropped: self.governor_dropped.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            connect_attempts: self.connect_attempts.load(Ordering::Relaxed),
        }
    }
}
