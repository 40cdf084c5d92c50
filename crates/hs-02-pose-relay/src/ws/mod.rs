//! WebSocket layer: connection handling, the consumer registry and fan-out.

pub mod fanout;
pub mod handler;
pub mod registry;

pub use fanout::{fan_out, FanOutReport};
pub use handler::ConnectionHandler;
pub use registry::{ConsumerRecord, Outbox, SubscriptionRegistry};
