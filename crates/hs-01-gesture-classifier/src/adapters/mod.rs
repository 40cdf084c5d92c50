//! Adapters Layer - Conversions to the wire format

pub mod wire;

pub use wire::pose_event;
