//! # Publisher Client
//!
//! A background task that owns the relay connection. Producers hold a
//! cloneable [`PublisherHandle`] and enqueue events without blocking; the
//! task encodes them, paces them through the [`RateGovernor`] and sends
//! one text frame per event.
//!
//! Delivery is at-most-once. A failed send drops that event and marks the
//! connection closed; the next event reconnects first. A connection the
//! relay has already closed is replaced before anything is written to it.

use std::sync::Arc;
use std::time::Instant;

use shared_types::PoseEvent;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::adapters::TungsteniteConnector;
use crate::domain::{Admission, ConnectionState, PublisherConfig, RateGovernor};
use crate::error::PublisherError;
use crate::metrics::PublisherMetrics;
use crate::ports::{Connector, Transport};

/// Producer-side handle to a running publisher.
///
/// Cheap to clone; every method is safe to call from plain threads. The
/// publishing task stops once the last handle is dropped.
#[derive(Debug, Clone)]
pub struct PublisherHandle {
    queue: mpsc::UnboundedSender<PoseEvent>,
    state: watch::Receiver<ConnectionState>,
    metrics: Arc<PublisherMetrics>,
}

impl PublisherHandle {
    /// Append an event to the outbound queue. Never blocks.
    pub fn enqueue(&self, event: PoseEvent) -> Result<(), PublisherError> {
        self.queue.send(event).map_err(|_| PublisherError::Closed)?;
        self.metrics.record_enqueued();
        Ok(())
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch connection state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    pub fn metrics(&self) -> Arc<PublisherMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// The publishing task.
pub struct PublisherClient<C: Connector = TungsteniteConnector> {
    config: PublisherConfig,
    connector: C,
    queue: mpsc::UnboundedReceiver<PoseEvent>,
    governor: Option<RateGovernor<String>>,
    transport: Option<C::Transport>,
    state: watch::Sender<ConnectionState>,
    metrics: Arc<PublisherMetrics>,
}

impl PublisherClient<TungsteniteConnector> {
    /// Start a publisher over WebSocket. Must be called inside a tokio runtime.
    pub fn spawn(
        config: PublisherConfig,
    ) -> Result<(PublisherHandle, JoinHandle<()>), PublisherError> {
        Self::spawn_with(config, TungsteniteConnector)
    }
}

impl<C: Connector> PublisherClient<C> {
    /// Start a publisher over a custom transport.
    pub fn spawn_with(
        config: PublisherConfig,
        connector: C,
    ) -> Result<(PublisherHandle, JoinHandle<()>), PublisherError> {
        config.validate()?;

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let metrics = Arc::new(PublisherMetrics::new());

        let governor = config
            .governor
            .enabled
            .then(|| RateGovernor::new(config.governor.max_per_window, config.governor.window));

        let client = Self {
            config,
            connector,
            queue: queue_rx,
            governor,
            transport: None,
            state: state_tx,
            metrics: Arc::clone(&metrics),
        };

        let handle = PublisherHandle {
            queue: queue_tx,
            state: state_rx,
            metrics,
        };

        Ok((handle, tokio::spawn(client.run())))
    }

    async fn run(mut self) {
        info!(endpoint = %self.config.endpoint, "Publisher started");

        loop {
            let deadline = self.governor.as_ref().and_then(|g| g.next_ready_at());

            tokio::select! {
                received = self.queue.recv() => match received {
                    Some(event) => self.admit(event).await,
                    None => break,
                },
                _ = sleep_until(deadline) => {}
            }

            self.flush(Instant::now()).await;
        }

        // Every handle is gone; send what the governor is still holding
        while let Some(slot) = self.governor.as_ref().and_then(|g| g.next_ready_at()) {
            sleep_until(Some(slot)).await;
            self.flush(Instant::now()).await;
        }

        self.disconnect().await;
        info!(endpoint = %self.config.endpoint, "Publisher stopped");
    }

    /// Encode an event and either schedule it or send it straight away.
    async fn admit(&mut self, event: PoseEvent) {
        let text = match event.encode() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Dropping unencodable pose event");
                return;
            }
        };

        let Some(governor) = self.governor.as_mut() else {
            self.send(text).await;
            return;
        };

        match governor.offer(Instant::now(), text) {
            Admission::Accepted => {}
            Admission::Evicted(_) => {
                debug!("Governor evicted an older pending event");
                self.metrics.record_governor_drop();
            }
            Admission::Rejected(_) => {
                debug!("Governor window spent, event rejected");
                self.metrics.record_governor_drop();
            }
        }
    }

    /// Send every governed message whose slot has arrived.
    async fn flush(&mut self, now: Instant) {
        while let Some(text) = self.governor.as_mut().and_then(|g| g.pop_ready(now)) {
            self.send(text).await;
        }
    }

    async fn send(&mut self, text: String) {
        let stale = self.transport.as_ref().is_some_and(|t| !t.is_open());
        if stale {
            info!(endpoint = %self.config.endpoint, "Relay closed the connection, reconnecting");
        }

        if stale || self.transport.is_none() {
            let transport = self.connect().await;
            self.transport = Some(transport);
            // Slots that passed while reconnecting must not fire back-to-back
            if let Some(governor) = self.governor.as_mut() {
                governor.restart_pending(Instant::now());
            }
        }
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        match transport.send_text(text).await {
            Ok(()) => self.metrics.record_sent(),
            Err(e) => {
                error!(endpoint = %self.config.endpoint, error = %e, "Send failed, event dropped");
                self.metrics.record_send_failure();
                self.transport = None;
                self.set_state(ConnectionState::Disconnected);
            }
        }
    }

    /// Close any prior connection, then retry until one opens.
    async fn connect(&mut self) -> C::Transport {
        self.disconnect().await;
        self.set_state(ConnectionState::Connecting);

        loop {
            self.metrics.record_connect_attempt();
            match self.connector.connect(&self.config.endpoint).await {
                Ok(transport) => {
                    info!(endpoint = %self.config.endpoint, "Connected to relay");
                    self.set_state(ConnectionState::Connected);
                    return transport;
                }
                Err(e) => {
                    warn!(
                        endpoint = %self.config.endpoint,
                        error = %e,
                        retry_in = ?self.config.reconnect_backoff,
                        "Connection failed"
                    );
                    tokio::time::sleep(self.config.reconnect_backoff).await;
                }
            }
        }
    }

    async fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport.close().await {
                debug!(error = %e, "Error closing previous connection");
            }
        }
        self.set_state(ConnectionState::Disconnected);
    }

    fn set_state(&self, state: ConnectionState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            debug!(from = %previous, to = %state, "Publisher state changed");
        }
    }
}

/// Sleep until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending::<()>().await,
    }
}
