//! Typed error definitions for the price feed.
//!
//! [`PriceFeedError`] covers every way a store operation can be rejected, plus
//! configuration and parse failures. All variants implement
//! `std::error::Error` via `thiserror`, so they integrate with `anyhow::Result`
//! in the runner.

use thiserror::Error;

use crate::types::{Identity, Symbol};

/// Domain-specific errors for the price feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceFeedError {
    /// A write was attempted by someone other than the owner.
    #[error("unauthorized: {caller} is not the feed owner")]
    Unauthorized { caller: Identity },

    /// The proposed publish time does not strictly exceed the stored one.
    #[error("non-monotonic publish time for {symbol}: {proposed} <= {stored}")]
    NonMonotonicTime { symbol: Symbol, proposed: u64, stored: u64 },

    /// The proposed publish time is further in the future than allowed.
    #[error("publish time {proposed} exceeds current time {current_time} + tolerance {tolerance}")]
    FutureTimeExceedsTolerance { proposed: u64, current_time: u64, tolerance: u64 },

    /// A read for a symbol that has never had an accepted write.
    #[error("unsupported symbol: {0}")]
    UnsupportedSymbol(Symbol),

    /// The stored price is older than the caller accepts.
    #[error("stale price for {symbol}: published {publish_time}, now {current_time}, max age {max_age}")]
    StalePrice { symbol: Symbol, publish_time: u64, current_time: u64, max_age: u64 },

    /// The store's clock follows real time and cannot be overridden.
    #[error("clock is not settable")]
    ClockNotSettable,

    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed identity, command, or other input.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PriceFeedError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::NonMonotonicTime { .. } => "non_monotonic_time",
            Self::FutureTimeExceedsTolerance { .. } => "future_time_exceeds_tolerance",
            Self::UnsupportedSymbol(_) => "unsupported_symbol",
            Self::StalePrice { .. } => "stale_price",
            Self::ClockNotSettable => "clock_not_settable",
            Self::Config(_) => "config",
            Self::Parse(_) => "parse",
        }
    }
}
