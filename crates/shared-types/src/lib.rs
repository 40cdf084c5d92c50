//! # Shared Types Crate
//!
//! Wire-level types shared by the classifier, the relay and the publisher.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: landmarks, handedness, pose events and
//!   subscription masks are defined once here.
//! - **Absence is data**: a hand that was not detected, or a category a
//!   consumer did not ask for, is `None`, never an error.

pub mod durations;
pub mod entities;
pub mod errors;
pub mod event;
pub mod subscription;

pub use entities::*;
pub use errors::*;
pub use event::{HandPayload, InboundFrame, LandmarkMap, PoseEvent, PING_FRAME};
pub use subscription::{SubscriptionMask, HANDSHAKE_DELIMITER, PREFERENCE_WIDTH};
