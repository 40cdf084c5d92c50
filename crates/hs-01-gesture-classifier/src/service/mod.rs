//! Service Layer - Orchestration

pub mod classifier;
pub mod producer;

pub use classifier::GestureClassifier;
pub use producer::{DetectedHand, FrameSampler, PoseProducer};
