//! # mpf-store
//!
//! The owner-written, time-ordered, per-symbol latest-price store.
//!
//! - [`store`] — [`PriceStore`]: single-owner store with monotonic publish
//!   times and a future-time tolerance window
//! - [`shared`] — [`SharedPriceStore`]: cloneable handle for concurrent readers

pub mod shared;
pub mod store;

pub use shared::SharedPriceStore;
pub use store::PriceStore;
