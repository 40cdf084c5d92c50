//! Producer-side frame handling
//!
//! The pose estimator runs at camera rate; consumers only need a steady
//! trickle. [`PoseProducer`] samples frames at a fixed interval, classifies
//! every detected hand and assembles the wire event.

use shared_types::{Handedness, Landmark, PoseEvent};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::adapters::wire::pose_event;
use crate::domain::{ClassifierConfig, HandLandmarks};
use crate::error::ClassifierError;
use crate::ports::PoseClassifier;
use crate::service::GestureClassifier;

/// Lets at most one frame through per interval.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    interval: Duration,
    last_emit: Option<Instant>,
}

impl FrameSampler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame arriving at `now` should be processed. Records the
    /// emission when it returns `true`.
    pub fn should_emit(&mut self, now: Instant) -> bool {
        let due = match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_emit = Some(now);
        }
        due
    }
}

/// One hand as reported by the upstream estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHand {
    pub handedness: Handedness,
    pub landmarks: HandLandmarks,
}

impl DetectedHand {
    pub fn new(handedness: Handedness, landmarks: HandLandmarks) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    /// Build from the estimator's raw output: a handedness label and a list
    /// of `(x, y, z)` triples.
    pub fn from_raw(label: &str, points: &[(f64, f64, f64)]) -> Result<Self, ClassifierError> {
        let handedness = Handedness::parse(label)?;
        let landmarks: Vec<Landmark> = points.iter().copied().map(Landmark::from).collect();
        Ok(Self::new(handedness, HandLandmarks::try_from(landmarks)?))
    }
}

/// Samples frames and turns the hands in them into pose events.
pub struct PoseProducer<C = GestureClassifier> {
    classifier: C,
    sampler: FrameSampler,
}

impl PoseProducer<GestureClassifier> {
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let classifier = GestureClassifier::from_config(config)?;
        Ok(Self::new(classifier, config.sample_interval))
    }
}

impl<C: PoseClassifier> PoseProducer<C> {
    pub fn new(classifier: C, sample_interval: Duration) -> Self {
        Self {
            classifier,
            sampler: FrameSampler::new(sample_interval),
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Process one camera frame.
    ///
    /// Returns `None` when the frame falls inside the sampling interval.
    /// Otherwise returns an event with one entry per detected hand; a frame
    /// with no hands still yields an event with both hands absent. If the
    /// estimator reports the same handedness twice, the later hand wins.
    pub fn process_frame(&mut self, now: Instant, hands: &[DetectedHand]) -> Option<PoseEvent> {
        if !self.sampler.should_emit(now) {
            return None;
        }

        let poses: Vec<_> = hands
            .iter()
            .map(|hand| self.classifier.classify(&hand.landmarks, hand.handedness))
            .collect();

        debug!(hands = poses.len(), "Sampled frame");
        Some(pose_event(&poses))
    }
}
