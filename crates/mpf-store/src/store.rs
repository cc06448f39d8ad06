//! Single-owner latest-price store.
//!
//! [`PriceStore`] keeps exactly one [`PriceTick`] per [`Symbol`]: the latest
//! accepted one. A write is accepted only if
//!
//! 1. the caller is the owner fixed at construction,
//! 2. its publish time is strictly greater than the stored one (an
//!    unsupported symbol counts as stored time `0`, so publish time `0` is
//!    never accepted), and
//! 3. its publish time is at most `clock.now() + tolerance`.
//!
//! Checks run in that order, and a rejected write leaves the store untouched.
//! A symbol becomes supported on its first accepted write and stays supported
//! for the lifetime of the store; entries are replaced, never removed.
//!
//! # Thread safety
//!
//! Writes take `&mut self`. Wrap the store in a
//! [`SharedPriceStore`](crate::SharedPriceStore) to share it across threads.

use ahash::AHashMap;
use mpf_core::{Identity, PriceFeedError, PriceTick, Symbol, SystemClock, TimeSource};
use tracing::{debug, warn};

/// Owner-written, time-ordered, per-symbol latest-value store.
pub struct PriceStore<C = SystemClock> {
    owner: Identity,
    tolerance: u64,
    clock: C,
    ticks: AHashMap<Symbol, PriceTick>,
}

impl<C: TimeSource> PriceStore<C> {
    /// Create an empty store writable only by `owner`.
    ///
    /// `tolerance` is the maximum number of seconds a publish time may lead
    /// `clock.now()`.
    pub fn new(owner: Identity, tolerance: u64, clock: C) -> Self {
        Self { owner, tolerance, clock, ticks: AHashMap::new() }
    }

    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn tolerance(&self) -> u64 {
        self.tolerance
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current time as seen by the future-time check.
    pub fn current_time(&self) -> u64 {
        self.clock.now()
    }

    /// Whether `symbol` has had at least one accepted write.
    #[inline]
    pub fn is_supported(&self, symbol: impl AsRef<[u8]>) -> bool {
        self.ticks.contains_key(symbol.as_ref())
    }

    /// The latest accepted tick for `symbol`.
    ///
    /// Fails with [`PriceFeedError::UnsupportedSymbol`] if nothing was ever
    /// published for it, so a stored price of `0` is never confused with
    /// "no price".
    #[inline]
    pub fn latest(&self, symbol: impl AsRef<[u8]>) -> Result<PriceTick, PriceFeedError> {
        let symbol = symbol.as_ref();
        self.ticks.get(symbol).copied().ok_or_else(|| PriceFeedError::UnsupportedSymbol(Symbol::from(symbol)))
    }

    /// As [`latest`](Self::latest), but also fails with
    /// [`PriceFeedError::StalePrice`] when the tick is more than `max_age`
    /// seconds older than the current time.
    pub fn latest_no_older_than(&self, symbol: impl AsRef<[u8]>, max_age: u64) -> Result<PriceTick, PriceFeedError> {
        let symbol = symbol.as_ref();
        let tick = self.latest(symbol)?;
        let current_time = self.clock.now();
        if tick.age(current_time) > max_age {
            return Err(PriceFeedError::StalePrice {
                symbol: Symbol::from(symbol),
                publish_time: tick.publish_time,
                current_time,
                max_age,
            });
        }
        Ok(tick)
    }

    /// Publish a new latest price for `symbol` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`PriceFeedError::Unauthorized`] if `caller` is not the owner
    /// - [`PriceFeedError::NonMonotonicTime`] if `publish_time` does not
    ///   strictly exceed the stored publish time
    /// - [`PriceFeedError::FutureTimeExceedsTolerance`] if `publish_time` is
    ///   later than `current_time() + tolerance()`
    pub fn push(
        &mut self,
        caller: &Identity,
        symbol: impl AsRef<[u8]>,
        publish_time: u64,
        price: i64,
    ) -> Result<(), PriceFeedError> {
        let symbol = symbol.as_ref();
        if let Err(e) = self.check_push(caller, symbol, publish_time) {
            warn!(%caller, "push rejected: {e}");
            return Err(e);
        }

        let tick = PriceTick::new(publish_time, price);
        match self.ticks.get_mut(symbol) {
            Some(slot) => *slot = tick,
            None => {
                self.ticks.insert(Symbol::from(symbol), tick);
            }
        }
        debug!(symbol = %Symbol::from(symbol), publish_time, price, "price accepted");
        Ok(())
    }

    fn check_push(&self, caller: &Identity, symbol: &[u8], publish_time: u64) -> Result<(), PriceFeedError> {
        if *caller != self.owner {
            return Err(PriceFeedError::Unauthorized { caller: *caller });
        }

        let stored = self.ticks.get(symbol).map_or(0, |t| t.publish_time);
        if publish_time <= stored {
            return Err(PriceFeedError::NonMonotonicTime { symbol: Symbol::from(symbol), proposed: publish_time, stored });
        }

        let current_time = self.clock.now();
        if publish_time > current_time.saturating_add(self.tolerance) {
            return Err(PriceFeedError::FutureTimeExceedsTolerance {
                proposed: publish_time,
                current_time,
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }

    /// Override the clock's current time.
    ///
    /// Test/administration hook: fails with
    /// [`PriceFeedError::ClockNotSettable`] on a real-time clock.
    pub fn set_current_time(&self, time: u64) -> Result<(), PriceFeedError> {
        self.clock.set_now(time)?;
        debug!(time, "current time overridden");
        Ok(())
    }

    /// All supported symbols, sorted by their bytes.
    pub fn supported_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.ticks.keys().cloned().collect();
        symbols.sort_unstable();
        symbols
    }

    /// Number of supported symbols.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for PriceStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceStore")
            .field("owner", &self.owner)
            .field("tolerance", &self.tolerance)
            .field("clock", &self.clock)
            .field("symbols", &self.ticks.len())
            .finish()
    }
}
