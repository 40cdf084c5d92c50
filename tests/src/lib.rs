//! # Handstream Test Suite
//!
//! Unified test crate for behavior that spans crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs      # Synthetic hands as raw estimator output
//! └── integration/     # Real sockets on 127.0.0.1
//!     ├── classifier_pipeline.rs
//!     ├── relay_fanout.rs
//!     └── publisher_relay.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hs-tests
//!
//! # By category
//! cargo test -p hs-tests integration::relay_fanout
//!
//! # Benchmarks
//! cargo bench -p hs-tests
//! ```

pub mod fixtures;
pub mod integration;
