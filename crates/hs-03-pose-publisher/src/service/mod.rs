//! Service Layer - The publishing task

pub mod publisher;

pub use publisher::{PublisherClient, PublisherHandle};
