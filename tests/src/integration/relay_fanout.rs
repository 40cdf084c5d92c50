//! # Relay Fan-Out
//!
//! Consumers subscribe with a handshake and receive each publication
//! trimmed to their mask. Publishers never hear their own frames.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hs_02_pose_relay::RelayConfig;
    use shared_types::{HandPayload, Landmark, LandmarkMap, PoseEvent, SubscriptionMask};
    use tokio_tungstenite::tungstenite::Message;

    use crate::integration::support::{eventually, next_event, next_message, send_text, TestRelay};

    fn full_event() -> PoseEvent {
        let landmarks: LandmarkMap = (0..21)
            .map(|i| (i, Landmark::new(i as f64 * 0.125, 0.5, 0.0)))
            .collect();
        let right = HandPayload {
            landmarks: Some(landmarks),
            orientation: Some("up".to_string()),
            gesture: Some("stop".to_string()),
        };
        PoseEvent::new(None, Some(right))
    }

    #[tokio::test]
    async fn test_mask_011_never_receives_landmarks() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut consumer = relay.subscribe(SubscriptionMask::from_preferences("011")).await?;
        let mut publisher = relay.connect().await?;

        for _ in 0..3 {
            send_text(&mut publisher, full_event().encode()?).await?;
            let event = next_event(&mut consumer).await?;

            let right = event.right.expect("right hand present");
            assert!(right.landmarks.is_none());
            assert_eq!(right.orientation.as_deref(), Some("up"));
            assert_eq!(right.gesture.as_deref(), Some("stop"));
            assert!(event.left.is_none());
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_each_consumer_gets_its_own_projection() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut landmarks_only = relay.subscribe(SubscriptionMask::from_preferences("100")).await?;
        let mut everything = relay.subscribe(SubscriptionMask::ALL).await?;
        let mut publisher = relay.connect().await?;

        send_text(&mut publisher, full_event().encode()?).await?;

        let trimmed = next_event(&mut landmarks_only).await?.right.expect("right hand");
        assert_eq!(trimmed.landmarks.map(|l| l.len()), Some(21));
        assert!(trimmed.orientation.is_none());
        assert!(trimmed.gesture.is_none());

        assert_eq!(next_event(&mut everything).await?, full_event());

        let snapshot = relay.metrics.snapshot();
        assert_eq!(snapshot.publications_received, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_sender_is_excluded() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut listener = relay.subscribe(SubscriptionMask::ALL).await?;
        let mut talker = relay.subscribe(SubscriptionMask::ALL).await?;

        send_text(&mut talker, full_event().encode()?).await?;
        assert_eq!(next_event(&mut listener).await?, full_event());

        // Frames on one connection are handled in order, so the pong comes
        // first only if the publication was never echoed back
        send_text(&mut talker, "ping").await?;
        assert!(matches!(next_message(&mut talker).await?, Message::Pong(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_handshake_then_disconnect_leaves_no_entry() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let consumer = relay.subscribe(SubscriptionMask::from_preferences("111")).await?;
        assert_eq!(relay.registry.len(), 1);

        drop(consumer);
        relay.wait_for_consumers(0).await?;

        let metrics = relay.metrics.clone();
        eventually(move || {
            let snapshot = metrics.snapshot();
            snapshot.consumers_registered == 0 && snapshot.connections_active == 0
        })
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_second_handshake_replaces_mask() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut consumer = relay.subscribe(SubscriptionMask::from_preferences("100")).await?;

        send_text(&mut consumer, ":001").await?;
        let registry = relay.registry.clone();
        eventually(move || {
            registry
                .snapshot()
                .first()
                .is_some_and(|record| record.mask == SubscriptionMask::from_preferences("001"))
        })
        .await?;
        assert_eq!(relay.registry.len(), 1);

        let mut publisher = relay.connect().await?;
        send_text(&mut publisher, full_event().encode()?).await?;
        let right = next_event(&mut consumer).await?.right.expect("right hand");
        assert!(right.landmarks.is_none());
        assert_eq!(right.gesture.as_deref(), Some("stop"));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_publication_dropped() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut consumer = relay.subscribe(SubscriptionMask::ALL).await?;
        let mut publisher = relay.connect().await?;

        send_text(&mut publisher, "{not json").await?;
        send_text(&mut publisher, full_event().encode()?).await?;

        // Only the well-formed frame arrives
        assert_eq!(next_event(&mut consumer).await?, full_event());
        assert_eq!(relay.metrics.snapshot().malformed_frames, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_absent_placeholders_accepted() -> anyhow::Result<()> {
        let relay = TestRelay::start().await?;
        let mut consumer = relay.subscribe(SubscriptionMask::ALL).await?;
        let mut publisher = relay.connect().await?;

        send_text(
            &mut publisher,
            r#"{"Left": "None", "Right": {"Gesture": "fist", "Orientation": "None"}}"#,
        )
        .await?;

        let event = next_event(&mut consumer).await?;
        assert!(event.left.is_none());
        let right = event.right.expect("right hand");
        assert_eq!(right.gesture.as_deref(), Some("fist"));
        assert!(right.orientation.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_frame_dropped() -> anyhow::Result<()> {
        let relay = TestRelay::start_with(RelayConfig {
            port: 0,
            max_message_size: 64,
            ..RelayConfig::default()
        })
        .await?;
        let mut consumer = relay.subscribe(SubscriptionMask::ALL).await?;
        let mut publisher = relay.connect().await?;

        send_text(&mut publisher, full_event().encode()?).await?;
        send_text(&mut publisher, r#"{"Left": null, "Right": null}"#).await?;

        assert_eq!(next_event(&mut consumer).await?, PoseEvent::default());
        assert_eq!(relay.metrics.snapshot().oversized_frames, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_idle_connection_survives_receive_timeout() -> anyhow::Result<()> {
        let relay = TestRelay::start_with(RelayConfig {
            port: 0,
            recv_timeout: Duration::from_millis(50),
            ..RelayConfig::default()
        })
        .await?;
        let mut consumer = relay.subscribe(SubscriptionMask::ALL).await?;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(relay.registry.len(), 1);

        let mut publisher = relay.connect().await?;
        send_text(&mut publisher, full_event().encode()?).await?;
        assert_eq!(next_event(&mut consumer).await?, full_event());
        Ok(())
    }
}
