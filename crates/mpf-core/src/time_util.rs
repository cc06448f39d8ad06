//! Wall-clock time utilities.
//!
//! Publish times and the store clock use **seconds since Unix epoch**. A
//! system clock set before the epoch reads as zero.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[inline]
fn since_epoch() -> Duration {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default()
}

/// Current time as **seconds** since Unix epoch.
#[inline]
pub fn now_secs() -> u64 {
    since_epoch().as_secs()
}
