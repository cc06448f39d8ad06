//! Time sources for the store's future-time check.
//!
//! The store never reads a global clock. It is constructed with a
//! [`TimeSource`]: [`SystemClock`] in deployments, [`ManualClock`] wherever the
//! current time has to be pinned (tests, replays, admin consoles).
//! [`ConfiguredClock`] picks one of the two from configuration.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{config::ClockConfig, error::PriceFeedError, time_util};

/// Source of "current time" in seconds since Unix epoch.
pub trait TimeSource: Send + Sync {
    /// Current time in seconds.
    fn now(&self) -> u64;

    /// Override the current time.
    ///
    /// Only clocks meant for tests or administration support this; the
    /// default refuses with [`PriceFeedError::ClockNotSettable`].
    fn set_now(&self, _time: u64) -> Result<(), PriceFeedError> {
        Err(PriceFeedError::ClockNotSettable)
    }
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> u64 {
        time_util::now_secs()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self { now: AtomicU64::new(start) }
    }

    pub fn set(&self, time: u64) {
        self.now.store(time, Ordering::Release);
    }

    /// Move the clock forward by `secs`, saturating at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        let _ = self.now.fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| Some(t.saturating_add(secs)));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }

    fn set_now(&self, time: u64) -> Result<(), PriceFeedError> {
        self.set(time);
        Ok(())
    }
}

/// Clock selected by the `clock` section of the config file.
#[derive(Debug)]
pub enum ConfiguredClock {
    System(SystemClock),
    Manual(ManualClock),
}

impl ConfiguredClock {
    pub fn from_config(config: &ClockConfig) -> Self {
        match config {
            ClockConfig::System => Self::System(SystemClock),
            ClockConfig::Manual { start_time } => Self::Manual(ManualClock::new(*start_time)),
        }
    }

    pub fn is_settable(&self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

impl TimeSource for ConfiguredClock {
    fn now(&self) -> u64 {
        match self {
            Self::System(c) => c.now(),
            Self::Manual(c) => c.now(),
        }
    }

    fn set_now(&self, time: u64) -> Result<(), PriceFeedError> {
        match self {
            Self::System(c) => c.set_now(time),
            Self::Manual(c) => c.set_now(time),
        }
    }
}
