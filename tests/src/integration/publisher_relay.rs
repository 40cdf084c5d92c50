//! # Publisher → Relay → Consumer
//!
//! The full path: raw estimator output is sampled and classified, the
//! publisher paces it onto the relay, and a consumer receives its
//! projection.

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use hs_01_gesture_classifier::{ClassifierConfig, DetectedHand, PoseProducer};
    use hs_02_pose_relay::RelayConfig;
    use hs_03_pose_publisher::{ConnectionState, PublisherClient, PublisherConfig};
    use futures::StreamExt;
    use shared_types::{HandPayload, PoseEvent, SubscriptionMask};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio_tungstenite::tungstenite::Message;

    use crate::fixtures::{fist, open_hand};
    use crate::integration::support::{eventually, next_event, TestRelay, WAIT};

    fn publisher_config(endpoint: String) -> PublisherConfig {
        let mut config = PublisherConfig::with_endpoint(endpoint);
        config.reconnect_backoff = Duration::from_millis(50);
        config
    }

    #[tokio::test]
    async fn test_classified_frames_reach_consumer() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut consumer = relay.subscribe(SubscriptionMask::from_preferences("011")).await?;

        let (publisher, task) = PublisherClient::spawn(publisher_config(relay.url()))?;
        let mut producer = PoseProducer::from_config(&ClassifierConfig::default())?;

        let frames = [
            [DetectedHand::from_raw("Right", &open_hand())?],
            [DetectedHand::from_raw("Right", &fist())?],
        ];
        let start = Instant::now();
        for (i, hands) in frames.iter().enumerate() {
            let at = start + Duration::from_millis(100) * i as u32;
            if let Some(event) = producer.process_frame(at, hands) {
                publisher.enqueue(event)?;
            }
        }

        let first = next_event(&mut consumer).await?.right.expect("right hand");
        assert_eq!(first.gesture.as_deref(), Some("stop"));
        assert_eq!(first.orientation.as_deref(), Some("up"));
        assert!(first.landmarks.is_none());

        let second = next_event(&mut consumer).await?.right.expect("right hand");
        assert_eq!(second.gesture.as_deref(), Some("fist"));
        assert!(second.landmarks.is_none());

        assert_eq!(publisher.state(), ConnectionState::Connected);
        let metrics = publisher.metrics();
        drop(publisher);
        tokio::time::timeout(WAIT, task).await??;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.events_sent, 2);
        assert_eq!(snapshot.connect_attempts, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_publisher_is_not_a_consumer() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let (publisher, task) = PublisherClient::spawn(publisher_config(relay.url()))?;

        let mut producer = PoseProducer::from_config(&ClassifierConfig::default())?;
        let hands = [DetectedHand::from_raw("Left", &open_hand())?];
        if let Some(event) = producer.process_frame(Instant::now(), &hands) {
            publisher.enqueue(event)?;
        }

        let metrics = relay.metrics.clone();
        eventually(move || metrics.snapshot().publications_received == 1).await?;
        assert!(relay.registry.is_empty());

        drop(publisher);
        tokio::time::timeout(WAIT, task).await??;
        Ok(())
    }

    #[tokio::test]
    async fn test_publisher_waits_for_late_relay() -> anyhow::Result<()> {
        // Reserve a port, then release it so nothing is listening yet
        let port = TcpListener::bind("127.0.0.1:0").await?.local_addr()?.port();
        let endpoint = format!("ws://127.0.0.1:{port}/");

        let (publisher, task) = PublisherClient::spawn(publisher_config(endpoint))?;
        let mut state = publisher.subscribe_state();

        let mut producer = PoseProducer::from_config(&ClassifierConfig::default())?;
        let hands = [DetectedHand::from_raw("Right", &fist())?];
        if let Some(event) = producer.process_frame(Instant::now(), &hands) {
            publisher.enqueue(event)?;
        }

        // A few refused attempts first
        let metrics = publisher.metrics();
        let attempts = metrics.clone();
        eventually(move || attempts.snapshot().connect_attempts >= 3).await?;
        assert_eq!(publisher.state(), ConnectionState::Connecting);

        let relay = TestRelay::start_with(RelayConfig {
            port,
            ..RelayConfig::default()
        })
        .await?;

        tokio::time::timeout(WAIT, state.wait_for(|s| s.is_connected())).await??;
        let relay_metrics = relay.metrics.clone();
        eventually(move || relay_metrics.snapshot().publications_received == 1).await?;

        drop(publisher);
        tokio::time::timeout(WAIT, task).await??;
        assert_eq!(metrics.snapshot().events_sent, 1);
        Ok(())
    }

    fn tagged(tag: usize) -> PoseEvent {
        let hand = HandPayload {
            gesture: Some(format!("g{tag}")),
            ..HandPayload::default()
        };
        PoseEvent::new(None, Some(hand))
    }

    #[tokio::test]
    async fn test_publisher_reconnects_after_relay_hangs_up() -> anyhow::Result<()> {
        // A bare server: the first connection takes one frame and hangs up,
        // later ones forward (connection, gesture) pairs
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("ws://{}/", listener.local_addr()?);
        let (frames_tx, mut frames) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut connection = 0;
            while let Ok((tcp, _)) = listener.accept().await {
                connection += 1;
                let Ok(mut ws) = tokio_tungstenite::accept_async(tcp).await else {
                    continue;
                };
                let frames_tx = frames_tx.clone();
                tokio::spawn(async move {
                    while let Some(Ok(message)) = ws.next().await {
                        if let Message::Text(text) = message {
                            let gesture = PoseEvent::decode(text.as_str())
                                .ok()
                                .and_then(|event| event.right)
                                .and_then(|hand| hand.gesture);
                            let _ = frames_tx.send((connection, gesture));
                            if connection == 1 {
                                break;
                            }
                        }
                    }
                });
            }
        });

        let mut config = publisher_config(endpoint);
        config.governor.enabled = false;
        let (publisher, task) = PublisherClient::spawn(config)?;

        publisher.enqueue(tagged(1))?;
        let first = tokio::time::timeout(WAIT, frames.recv()).await?;
        assert_eq!(first, Some((1, Some("g1".to_string()))));

        // Let the hang-up reach the publisher before anything else is sent
        tokio::time::sleep(Duration::from_millis(200)).await;
        for tag in 2..=5 {
            publisher.enqueue(tagged(tag))?;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut delivered = Vec::new();
        while delivered.len() < 4 {
            match tokio::time::timeout(WAIT, frames.recv()).await? {
                Some(frame) => delivered.push(frame),
                None => break,
            }
        }
        let expected: Vec<_> = (2..=5).map(|tag| (2, Some(format!("g{tag}")))).collect();
        assert_eq!(delivered, expected);

        let metrics = publisher.metrics();
        drop(publisher);
        tokio::time::timeout(WAIT, task).await??;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.events_sent, 5);
        assert_eq!(snapshot.send_failures, 0);
        assert_eq!(snapshot.connect_attempts, 2);
        Ok(())
    }
}
