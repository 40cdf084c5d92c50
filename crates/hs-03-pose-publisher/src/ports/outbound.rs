//! Outbound Ports (Driven Ports)
//!
//! The publisher only needs "open a connection" and "send a text frame";
//! anything that can do both can carry pose events.

use async_trait::async_trait;

use crate::error::PublisherError;

/// An open, writable connection to the relay.
#[async_trait]
pub trait Transport: Send {
    /// Send one text frame.
    async fn send_text(&mut self, text: String) -> Result<(), PublisherError>;

    /// Whether the peer is still there. Goes false once the far side closes
    /// or the connection errors, even if nothing was sent since.
    fn is_open(&self) -> bool;

    /// Close the connection. Errors are informational; the transport is
    /// discarded either way.
    async fn close(&mut self) -> Result<(), PublisherError>;
}

/// Opens [`Transport`]s to an endpoint.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Transport: Transport + 'static;

    async fn connect(&self, endpoint: &str) -> Result<Self::Transport, PublisherError>;
}
