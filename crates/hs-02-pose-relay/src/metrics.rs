//! Relay counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Relay metrics
#[derive(Debug, Default)]
pub struct RelayMetrics {
    // Connection counters
    pub connections_active: AtomicU64,
    pub connections_total: AtomicU64,
    pub consumers_registered: AtomicU64,

    // Traffic counters
    pub publications_received: AtomicU64,
    pub deliveries_sent: AtomicU64,
    pub deliveries_dropped: AtomicU64,
    pub malformed_frames: AtomicU64,
    pub oversized_frames: AtomicU64,
}

/// Point-in-time copy of [`RelayMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelayMetricsSnapshot {
    pub connections_active: u64,
    pub connections_total: u64,
    pub consumers_registered: u64,
    pub publications_received: u64,
    pub deliveries_sent: u64,
    pub deliveries_dropped: u64,
    pub malformed_frames: u64,
    pub oversized_frames: u64,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_connect(&self) {
        self.connections_active.fetch_add(1, Ordering::Relaxed);
        self.connections_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disconnect(&self) {
        self.connections_active.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_register(&self) {
        self.consumers_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unregister(&self) {
        self.consumers_registered.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_publication(&self) {
        self.publications_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one fan-out
    pub fn record_fan_out(&self, delivered: u64, dropped: u64) {
        self.deliveries_sent.fetch_add(delivered, Ordering::Relaxed);
        self.deliveries_dropped.fetch_add(dropped, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_oversized(&self) {
        self.oversized_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RelayMetricsSnapshot {
        RelayMetricsSnapshot {
            connections_active: self.connections_active.load(Ordering::Relaxed),
            connections_total: self.connections_total.load(Ordering::Relaxed),
            consumers_registered: self.consumers_registered.load(Ordering::Relaxed),
            publications_received: self.publications_received.load(Ordering::Relaxed),
            deliveries_sent: self.deliveries_sent.load(Ordering::Relaxed),
            deliveries_dropped: self.deliveries_dropped.load(Ordering::Relaxed),
            malformed_frames: self.malformed_frames.load(Ordering::Relaxed),
            oversized_frames: self.oversized_frames.load(Ordering::Relaxed),
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        let s = self.snapshot();
        serde_json::json!({
            "connections": {
                "active": s.connections_active,
                "total": s.connections_total,
                "registered": s.consumers_registered,
            },
            "traffic": {
                "publications": s.publications_received,
                "delivered": s.deliveries_sent,
                "dropped": s.deliveries_dropped,
                "malformed": s.malformed_frames,
                "oversized": s.oversized_frames,
            }
        })
    }
}
