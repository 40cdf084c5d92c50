//! tokio-tungstenite implementation of the transport ports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::PublisherError;
use crate::ports::{Connector, Transport};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connects with [`connect_async`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

/// Client side of a WebSocket connection to the relay.
///
/// A background reader watches the inbound half so a close from the relay
/// is noticed before the next write, not after it is lost.
pub struct WsTransport {
    sink: SplitSink<Socket, Message>,
    open: Arc<AtomicBool>,
    reader: JoinHandle<()>,
}

#[async_trait]
impl Connector for TungsteniteConnector {
    type Transport = WsTransport;

    async fn connect(&self, endpoint: &str) -> Result<WsTransport, PublisherError> {
        let (stream, response) =
            connect_async(endpoint)
                .await
                .map_err(|e| PublisherError::Connect {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;
        debug!(endpoint = %endpoint, status = %response.status(), "WebSocket handshake complete");

        let (sink, stream) = stream.split();
        let open = Arc::new(AtomicBool::new(true));
        let reader = tokio::spawn(watch_inbound(stream, Arc::clone(&open)));
        Ok(WsTransport { sink, open, reader })
    }
}

/// Drain inbound frames until the relay goes away, then mark the
/// connection closed. Reading also lets the protocol layer answer pings.
async fn watch_inbound(mut stream: SplitStream<Socket>, open: Arc<AtomicBool>) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(reason)) => {
                debug!(?reason, "Relay closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "Relay connection failed");
                break;
            }
        }
    }
    open.store(false, Ordering::Release);
}

#[async_trait]
impl Transport for WsTransport {
    async fn send_text(&mut self, text: String) -> Result<(), PublisherError> {
        let result = self.sink.send(Message::Text(text.into())).await;
        if result.is_err() {
            self.open.store(false, Ordering::Release);
        }
        result.map_err(|e| PublisherError::Send(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    async fn close(&mut self) -> Result<(), PublisherError> {
        self.open.store(false, Ordering::Release);
        self.sink
            .close()
            .await
            .map_err(|e| PublisherError::Send(e.to_string()))
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
