//! Publication fan-out.
//!
//! A publication goes to every registered consumer except its sender, cut
//! down to that consumer's mask. Each distinct mask is projected and encoded
//! once per publication. Delivery is a non-blocking push into each
//! consumer's outbox, so one slow consumer cannot stall the others.

use axum::extract::ws::Message;
use shared_types::{PoseEvent, SubscriptionMask};
use std::collections::HashMap;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, warn};

use super::registry::SubscriptionRegistry;
use crate::domain::ConnectionId;

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub delivered: u64,
    pub dropped: u64,
}

/// Deliver `event` from `sender` to every other registered consumer.
pub fn fan_out(
    registry: &SubscriptionRegistry,
    sender: ConnectionId,
    event: &PoseEvent,
) -> FanOutReport {
    let mut report = FanOutReport::default();
    let mut encoded: HashMap<SubscriptionMask, String> = HashMap::new();

    for record in registry.snapshot() {
        if record.id == sender {
            continue;
        }

        let frame = match encoded.get(&record.mask) {
            Some(frame) => frame.clone(),
            None => match event.project(record.mask).encode() {
                Ok(frame) => {
                    encoded.insert(record.mask, frame.clone());
                    frame
                }
                Err(e) => {
                    error!(mask = %record.mask, error = %e, "Failed to encode projection");
                    report.dropped += 1;
                    continue;
                }
            },
        };

        match record.outbox.try_send(Message::Text(frame)) {
            Ok(()) => report.delivered += 1,
            Err(TrySendError::Full(_)) => {
                warn!(connection_id = %record.id, "Outbox full, dropping publication");
                report.dropped += 1;
            }
            Err(TrySendError::Closed(_)) => {
                debug!(connection_id = %record.id, "Outbox closed, consumer is leaving");
                report.dropped += 1;
            }
        }
    }

    report
}
