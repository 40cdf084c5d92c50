//! # Producer Pipeline
//!
//! Raw estimator output through sampling, classification and the wire
//! format, without any sockets.

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use hs_01_gesture_classifier::{
        ClassifierConfig, DetectedHand, GestureDefinition, MatchPolicy, Orientation,
        PoseProducer,
    };
    use shared_types::{PoseEvent, SubscriptionMask};

    use crate::fixtures::{fist, open_hand, upright_hand};

    #[test]
    fn test_frame_becomes_publication() {
        let mut producer = PoseProducer::from_config(&ClassifierConfig::default()).unwrap();
        let hands = [
            DetectedHand::from_raw("Left", &fist()).unwrap(),
            DetectedHand::from_raw("Right", &open_hand()).unwrap(),
        ];

        let event = producer.process_frame(Instant::now(), &hands).unwrap();
        let wire = PoseEvent::decode(&event.encode().unwrap()).unwrap();

        let left = wire.left.as_ref().unwrap();
        assert_eq!(left.gesture.as_deref(), Some("fist"));
        assert_eq!(left.orientation.as_deref(), Some("up"));

        // Upright open hand matches open_palm and stop; the later entry wins
        let right = wire.right.as_ref().unwrap();
        assert_eq!(right.gesture.as_deref(), Some("stop"));
        assert_eq!(right.landmarks.as_ref().map(|l| l.len()), Some(21));
    }

    #[test]
    fn test_sampling_interval_respected() {
        let mut producer = PoseProducer::from_config(&ClassifierConfig::default()).unwrap();
        let hands = [DetectedHand::from_raw("Right", &open_hand()).unwrap()];
        let start = Instant::now();

        assert!(producer.process_frame(start, &hands).is_some());
        assert!(producer
            .process_frame(start + Duration::from_millis(40), &hands)
            .is_none());
        assert!(producer
            .process_frame(start + Duration::from_millis(100), &hands)
            .is_some());
    }

    #[test]
    fn test_configured_table_and_policy() {
        let open = serde_json::json!({"thumb": true, "index": true, "middle": true, "ring": true, "pinky": true});
        let config: ClassifierConfig = serde_json::from_value(serde_json::json!({
            "sample_interval": "50ms",
            "match_policy": "first_match_wins",
            "gestures": [
                {"gesture": "open_palm", "orientation": "any", "pattern": open},
                {"gesture": "stop", "orientation": "up", "pattern": open}
            ]
        }))
        .unwrap();
        assert_eq!(config.match_policy, MatchPolicy::FirstMatchWins);
        assert_eq!(config.definitions().len(), 2);

        let mut producer = PoseProducer::from_config(&config).unwrap();
        let hands = [DetectedHand::from_raw("Right", &open_hand()).unwrap()];
        let event = producer.process_frame(Instant::now(), &hands).unwrap();
        assert_eq!(
            event.right.as_ref().and_then(|h| h.gesture.as_deref()),
            Some("open_palm")
        );
    }

    #[test]
    fn test_projection_of_classified_event() {
        let mut producer = PoseProducer::from_config(&ClassifierConfig::default()).unwrap();
        let peace = upright_hand([false, true, true, false, false]);
        let hands = [DetectedHand::from_raw("Left", &peace).unwrap()];
        let event = producer.process_frame(Instant::now(), &hands).unwrap();

        let projected = event.project(SubscriptionMask::from_preferences("011"));
        let left = projected.left.unwrap();
        assert!(left.landmarks.is_none());
        assert_eq!(left.gesture.as_deref(), Some("peace"));
        assert_eq!(left.orientation.as_deref(), Some("up"));
        assert!(projected.right.is_none());
    }

    #[test]
    fn test_bad_estimator_output_rejected() {
        assert!(DetectedHand::from_raw("Right", &open_hand()[..20]).is_err());
        assert!(DetectedHand::from_raw("Middle", &open_hand()).is_err());
    }

    #[test]
    fn test_definition_json_shape() {
        let definition: GestureDefinition = serde_json::from_str(
            r#"{
                "gesture": "rock",
                "orientation": "down",
                "pattern": {"thumb": false, "index": true, "middle": false, "ring": false, "pinky": true}
            }"#,
        )
        .unwrap();
        assert_eq!(definition.orientation, Orientation::Down);
    }
}
