//! Thread-safe handle to a [`PriceStore`].
//!
//! Every operation holds the lock for its whole duration, so each call is
//! atomic with respect to the registry: readers never observe a half-applied
//! write. Reads take the shared lock and run concurrently with each other.

use std::sync::Arc;

use mpf_core::{Identity, PriceFeedError, PriceTick, Symbol, SystemClock, TimeSource};
use parking_lot::RwLock;

use crate::store::PriceStore;

/// Cloneable, `Send + Sync` handle to a shared [`PriceStore`].
pub struct SharedPriceStore<C = SystemClock> {
    inner: Arc<RwLock<PriceStore<C>>>,
}

impl<C> Clone for SharedPriceStore<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: TimeSource> SharedPriceStore<C> {
    pub fn new(store: PriceStore<C>) -> Self {
        Self { inner: Arc::new(RwLock::new(store)) }
    }

    pub fn owner(&self) -> Identity {
        self.inner.read().owner()
    }

    pub fn tolerance(&self) -> u64 {
        self.inner.read().tolerance()
    }

    pub fn current_time(&self) -> u64 {
        self.inner.read().current_time()
    }

    pub fn is_supported(&self, symbol: impl AsRef<[u8]>) -> bool {
        self.inner.read().is_supported(symbol)
    }

    pub fn latest(&self, symbol: impl AsRef<[u8]>) -> Result<PriceTick, PriceFeedError> {
        self.inner.read().latest(symbol)
    }

    pub fn latest_no_older_than(&self, symbol: impl AsRef<[u8]>, max_age: u64) -> Result<PriceTick, PriceFeedError> {
        self.inner.read().latest_no_older_than(symbol, max_age)
    }

    pub fn push(
        &self,
        caller: &Identity,
        symbol: impl AsRef<[u8]>,
        publish_time: u64,
        price: i64,
    ) -> Result<(), PriceFeedError> {
        self.inner.write().push(caller, symbol, publish_time, price)
    }

    // Exclusive so no push runs its tolerance check against a half-moved clock.
    pub fn set_current_time(&self, time: u64) -> Result<(), PriceFeedError> {
        self.inner.write().set_current_time(time)
    }

    pub fn supported_symbols(&self) -> Vec<Symbol> {
        self.inner.read().supported_symbols()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
