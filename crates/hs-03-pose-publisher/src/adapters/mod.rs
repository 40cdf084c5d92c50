//! Adapters Layer - Concrete transports

pub mod ws_transport;

pub use ws_transport::{TungsteniteConnector, WsTransport};
