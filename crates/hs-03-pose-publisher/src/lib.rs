//! # Pose Publisher
//!
//! Delivers pose events from the producer to the relay.
//!
//! ## Architecture
//!
//! Hexagonal layout:
//!
//! - **Domain**: [`RateGovernor`] pacing, [`ConnectionState`] and configuration.
//!   No I/O.
//! - **Ports**: [`Connector`] / [`Transport`], the only things the publishing
//!   task needs from a network.
//! - **Adapters**: [`TungsteniteConnector`] over `tokio-tungstenite`.
//! - **Service**: [`PublisherClient`], the background task, and the
//!   [`PublisherHandle`] producers enqueue through.
//!
//! ## Delivery Rules
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Not connected | Reconnect before sending, retrying forever at a fixed backoff |
//! | Send fails | Event dropped, connection marked closed |
//! | Governor window full | Oldest pending event evicted, newcomer queued |
//! | Last handle dropped | Pending events flushed, connection closed, task ends |
//!
//! ## Usage
//!
//! ```ignore
//! use hs_03_pose_publisher::{PublisherClient, PublisherConfig};
//!
//! let (publisher, task) = PublisherClient::spawn(PublisherConfig::from_env()?)?;
//!
//! // From any thread, never blocks
//! publisher.enqueue(event)?;
//!
//! drop(publisher);
//! task.await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{TungsteniteConnector, WsTransport};
pub use domain::{
    Admission, ConfigError, ConnectionState, GovernorConfig, PublisherConfig, RateGovernor,
};
pub use error::PublisherError;
pub use metrics::{PublisherMetrics, PublisherMetricsSnapshot};
pub use ports::{Connector, Transport};
pub use service::{PublisherClient, PublisherHandle};
