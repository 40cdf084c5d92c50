//! # HS-02 Pose Relay
//!
//! Live, ephemeral fan-out of pose events over WebSocket. Any connected peer
//! may publish; every consumer that declared a subscription receives each
//! publication from other peers, reshaped to the categories it asked for.
//!
//! ## Protocol
//!
//! | Inbound text frame   | Effect                                      |
//! |----------------------|---------------------------------------------|
//! | `ping`               | Protocol Pong, nothing broadcast            |
//! | `:<prefs>`           | Register / re-register with a mask          |
//! | anything else        | Decode as `PoseEvent`, fan out to others    |
//!
//! `<prefs>` is one character per category in the order landmarks,
//! orientation, gesture. `1` means wanted; anything else, or a missing
//! character, means not wanted. `:011` subscribes to orientation and gesture
//! only.
//!
//! ## Guarantees
//!
//! - A consumer never receives a category it did not subscribe to.
//! - A publisher never receives its own publication.
//! - A disconnected connection leaves no registry entry behind.
//! - A slow consumer only loses its own deliveries (bounded outbox).
//! - Malformed or oversized publications are dropped; the sender stays
//!   connected.
//!
//! ## Usage Example
//!
//! ```ignore
//! use hs_02_pose_relay::{RelayConfig, RelayServer};
//!
//! let server = RelayServer::bind(RelayConfig::from_env()?).await?;
//! println!("listening on {}", server.local_addr()?);
//! server.run().await?;
//! ```

pub mod domain;
pub mod metrics;
pub mod service;
pub mod ws;

// Re-exports for convenience
pub use domain::{ConfigError, ConnectionId, RelayConfig, RelayError};
pub use metrics::{RelayMetrics, RelayMetricsSnapshot};
pub use service::RelayServer;
pub use ws::{fan_out, ConnectionHandler, ConsumerRecord, FanOutReport, SubscriptionRegistry};
