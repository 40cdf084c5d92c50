//! Ports Layer - Trait definitions

pub mod outbound;

pub use outbound::{Connector, Transport};
