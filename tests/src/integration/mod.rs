//! # Integration Tests
//!
//! Every test binds its relay to an ephemeral port, so they run in parallel.

pub mod classifier_pipeline;
pub mod publisher_relay;
pub mod relay_fanout;
pub mod support;
