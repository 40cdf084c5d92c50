//! WebSocket connection handler.
//!
//! One handler per connection. The socket is split: a writer task drains the
//! connection's outbox into the sink while this handler reads frames.
//!
//! Inbound text frames are one of:
//! - `ping`: answered with a protocol Pong, never broadcast
//! - `:<prefs>`: handshake, registers or re-registers the consumer
//! - anything else: a publication fanned out to every other consumer
//!
//! Binary frames holding UTF-8 are treated as text. Oversized and malformed
//! frames are dropped; the connection stays open.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use shared_types::{InboundFrame, PoseEvent, SubscriptionMask};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use super::fanout::fan_out;
use super::registry::{Outbox, SubscriptionRegistry};
use crate::domain::{ConnectionId, RelayConfig};
use crate::metrics::RelayMetrics;

/// WebSocket connection handler
pub struct ConnectionHandler {
    registry: Arc<SubscriptionRegistry>,
    metrics: Arc<RelayMetrics>,
    config: Arc<RelayConfig>,
    connection_id: ConnectionId,
}

impl ConnectionHandler {
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        metrics: Arc<RelayMetrics>,
        config: Arc<RelayConfig>,
    ) -> Self {
        let connection_id = registry.next_connection_id();
        Self {
            registry,
            metrics,
            config,
            connection_id,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Serve the connection until the peer closes it or the transport fails.
    pub async fn handle(self, socket: WebSocket) {
        info!(connection_id = %self.connection_id, "New WebSocket connection");
        self.metrics.record_connect();

        let (mut sink, mut stream) = socket.split();
        let (outbox, mut outbox_rx) = mpsc::channel::<Message>(self.config.outbox_capacity);

        let connection_id = self.connection_id;
        let writer = tokio::spawn(async move {
            while let Some(message) = outbox_rx.recv().await {
                if let Err(e) = sink.send(message).await {
                    debug!(connection_id = %connection_id, error = %e, "Write failed");
                    break;
                }
            }
            let _ = sink.close().await;
        });

        loop {
            let next = match timeout(self.config.recv_timeout, stream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    trace!(connection_id = %self.connection_id, "Receive timed out, waiting again");
                    continue;
                }
            };

            let Some(result) = next else {
                debug!(connection_id = %self.connection_id, "WebSocket stream ended");
                break;
            };

            match result {
                Ok(Message::Text(text)) => {
                    if !self.handle_text(&text, &outbox).await {
                        break;
                    }
                }
                Ok(Message::Binary(data)) => match String::from_utf8(data) {
                    Ok(text) => {
                        if !self.handle_text(&text, &outbox).await {
                            break;
                        }
                    }
                    Err(_) => {
                        warn!(connection_id = %self.connection_id, "Dropping non-UTF-8 binary frame");
                        self.metrics.record_malformed();
                    }
                },
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol pings are answered by the websocket layer itself
                }
                Ok(Message::Close(_)) => {
                    debug!(connection_id = %self.connection_id, "WebSocket close received");
                    break;
                }
                Err(e) => {
                    warn!(connection_id = %self.connection_id, error = %e, "WebSocket error");
                    break;
                }
            }
        }

        // Cleanup subscription on disconnect
        if self.registry.unregister(self.connection_id) {
            self.metrics.record_unregister();
        }
        self.metrics.record_disconnect();

        // Writer exits once every outbox sender is gone
        drop(outbox);
        if let Err(e) = writer.await {
            debug!(connection_id = %self.connection_id, error = %e, "Writer task failed");
        }

        info!(connection_id = %self.connection_id, "WebSocket connection closed");
    }

    /// Returns `false` when the connection should be closed.
    async fn handle_text(&self, text: &str, outbox: &Outbox) -> bool {
        if text.len() > self.config.max_message_size {
            warn!(
                connection_id = %self.connection_id,
                size = text.len(),
                max = self.config.max_message_size,
                "Message exceeds size limit"
            );
            self.metrics.record_oversized();
            return true;
        }

        match InboundFrame::classify(text) {
            InboundFrame::Ping => outbox.send(Message::Pong(Vec::new())).await.is_ok(),
            InboundFrame::Handshake(mask) => {
                self.handle_handshake(mask, outbox);
                true
            }
            InboundFrame::Publication(payload) => {
                self.handle_publication(payload);
                true
            }
        }
    }

    fn handle_handshake(&self, mask: SubscriptionMask, outbox: &Outbox) {
        if self
            .registry
            .register(self.connection_id, outbox.clone(), mask)
        {
            self.metrics.record_register();
            info!(connection_id = %self.connection_id, mask = %mask, "Consumer subscribed");
        } else {
            info!(connection_id = %self.connection_id, mask = %mask, "Consumer changed subscription");
        }
    }

    fn handle_publication(&self, payload: &str) {
        let event = match PoseEvent::decode(payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(connection_id = %self.connection_id, error = %e, "Dropping malformed publication");
                self.metrics.record_malformed();
                return;
            }
        };

        self.metrics.record_publication();
        let report = fan_out(&self.registry, self.connection_id, &event);
        self.metrics.record_fan_out(report.delivered, report.dropped);

        trace!(
            connection_id = %self.connection_id,
            delivered = report.delivered,
            dropped = report.dropped,
            "Fanned out publication"
        );
    }
}
