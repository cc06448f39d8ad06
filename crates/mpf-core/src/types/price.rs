//! The price observation stored per symbol.

use serde::{Deserialize, Serialize};

/// One published observation: when it was published and at what price.
///
/// `publish_time` is in **seconds since Unix epoch**, the same unit the
/// store's clock reports. `price` is an opaque signed integer; scaling
/// (decimals) is a convention between publisher and readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceTick {
    pub publish_time: u64,
    pub price: i64,
}

impl PriceTick {
    pub const fn new(publish_time: u64, price: i64) -> Self {
        Self { publish_time, price }
    }

    /// Seconds elapsed between publication and `now`, zero if published in
    /// the future.
    #[inline]
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.publish_time)
    }
}

impl std::fmt::Display for PriceTick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "price={} publish_time={}", self.price, self.publish_time)
    }
}
