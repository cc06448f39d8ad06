//! # mpf-core
//!
//! Core crate for the manual price feed, providing:
//!
//! - **Types** (`types`) — `Symbol`, `PriceTick`, and caller `Identity`
//! - **Clock** (`clock`) — `TimeSource` trait with real-time and manual clocks
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `PriceFeedError` via thiserror
//! - **Time utilities** (`time_util`) — wall-clock timestamps
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod time_util;
pub mod types;

// Re-export types at crate root for convenience.
pub use clock::{ConfiguredClock, ManualClock, SystemClock, TimeSource};
pub use error::PriceFeedError;
pub use types::*;
