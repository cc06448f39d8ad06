//! Core data types of the price feed.
//!
//! Symbols are opaque byte strings compared byte-for-byte; a [`PriceTick`] is
//! the single latest observation stored per symbol.

pub mod identity;
pub mod price;
pub mod symbol;

pub use identity::*;
pub use price::*;
pub use symbol::*;
