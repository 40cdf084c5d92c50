//! Helpers shared by the socket-level tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use futures::{SinkExt, StreamExt};
use hs_02_pose_relay::{RelayConfig, RelayMetrics, RelayServer, SubscriptionRegistry};
use shared_types::{PoseEvent, SubscriptionMask};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const WAIT: Duration = Duration::from_secs(5);

/// A relay running in the background.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub registry: Arc<SubscriptionRegistry>,
    pub metrics: Arc<RelayMetrics>,
}

impl TestRelay {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(RelayConfig {
            port: 0,
            ..RelayConfig::default()
        })
        .await
    }

    pub async fn start_with(config: RelayConfig) -> anyhow::Result<Self> {
        handstream_telemetry::try_init_for_tests();

        let server = RelayServer::bind(config).await?;
        let relay = Self {
            addr: server.local_addr()?,
            registry: server.registry(),
            metrics: server.metrics(),
        };
        tokio::spawn(server.run());
        Ok(relay)
    }

    pub fn url(&self) -> String {
        format!("ws://{}/", self.addr)
    }

    pub async fn connect(&self) -> anyhow::Result<Client> {
        let (client, _) = connect_async(self.url()).await?;
        Ok(client)
    }

    /// Connect and subscribe, returning once the relay has registered us.
    pub async fn subscribe(&self, mask: SubscriptionMask) -> anyhow::Result<Client> {
        let expected = self.registry.len() + 1;
        let mut client = self.connect().await?;
        client.send(Message::Text(mask.to_handshake().into())).await?;
        self.wait_for_consumers(expected).await?;
        Ok(client)
    }

    pub async fn wait_for_consumers(&self, count: usize) -> anyhow::Result<()> {
        let registry = Arc::clone(&self.registry);
        eventually(move || registry.len() == count)
            .await
            .with_context(|| format!("registry never reached {count} consumers"))
    }
}

/// Poll `check` every 10ms until it holds or [`WAIT`] elapses.
pub async fn eventually<F>(check: F) -> anyhow::Result<()>
where
    F: Fn() -> bool,
{
    tokio::time::timeout(WAIT, async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .map_err(|_| anyhow!("condition not met within {WAIT:?}"))
}

/// Next data or control frame.
pub async fn next_message(client: &mut Client) -> anyhow::Result<Message> {
    tokio::time::timeout(WAIT, client.next())
        .await
        .context("timed out waiting for a frame")?
        .context("connection closed")?
        .map_err(Into::into)
}

/// Next frame, which must be a publication.
pub async fn next_event(client: &mut Client) -> anyhow::Result<PoseEvent> {
    match next_message(client).await? {
        Message::Text(text) => Ok(PoseEvent::decode(text.as_str())?),
        other => Err(anyhow!("expected a publication, got {other:?}")),
    }
}

pub async fn send_text(client: &mut Client, text: impl Into<String>) -> anyhow::Result<()> {
    let text: String = text.into();
    client.send(Message::Text(text.into())).await?;
    Ok(())
}
