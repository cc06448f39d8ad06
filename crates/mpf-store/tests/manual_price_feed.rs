//! End-to-end behaviour of a manually published price feed: owner-only
//! writes, strictly increasing publish times, and a 900 s future-time
//! tolerance against a pinned clock at t = 1000.

use mpf_core::{Identity, ManualClock, PriceFeedError, PriceTick, Symbol};
use mpf_store::{PriceStore, SharedPriceStore};

const OWNER: Identity = Identity::from_bytes([0xaa; 32]);
const STRANGER: Identity = Identity::from_bytes([0xbb; 32]);
const TOLERANCE: u64 = 900;
const NOW: u64 = 1000;

fn feed() -> PriceStore<ManualClock> {
    PriceStore::new(OWNER, TOLERANCE, ManualClock::new(NOW))
}

#[test]
fn unknown_symbols_are_unsupported() {
    let feed = feed();
    for sym in ["Symbol", "", "btc", "BTC/USD"] {
        assert!(!feed.is_supported(sym));
        assert_eq!(feed.latest(sym), Err(PriceFeedError::UnsupportedSymbol(Symbol::from(sym))));
    }
}

#[test]
fn push_and_overwrite_latest_price() {
    let mut feed = feed();
    feed.push(&OWNER, "Symbol", 100, 500).unwrap();
    assert!(feed.is_supported("Symbol"));
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(100, 500));

    feed.push(&OWNER, "Symbol", 200, 1000).unwrap();
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(200, 1000));
    assert_eq!(feed.len(), 1);
}

#[test]
fn symbols_are_independent() {
    let mut feed = feed();
    feed.push(&OWNER, "First", 100, 500).unwrap();
    assert!(!feed.is_supported("Second"));

    feed.push(&OWNER, "Second", 200, 1000).unwrap();
    assert_eq!(feed.latest("First").unwrap(), PriceTick::new(100, 500));
    assert_eq!(feed.latest("Second").unwrap(), PriceTick::new(200, 1000));

    // A later time on one symbol does not constrain the other.
    feed.push(&OWNER, "First", 150, 600).unwrap();
    assert_eq!(feed.latest("First").unwrap(), PriceTick::new(150, 600));
    assert_eq!(feed.latest("Second").unwrap(), PriceTick::new(200, 1000));
}

#[test]
fn last_write_wins() {
    let mut feed = feed();
    for (t, p) in [(10, 1), (20, -2), (30, 3), (1900, 4)] {
        feed.push(&OWNER, "Symbol", t, p).unwrap();
    }
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(1900, 4));
}

#[test]
fn earlier_publish_time_is_rejected() {
    let mut feed = feed();
    feed.push(&OWNER, "Symbol", 100, 500).unwrap();

    let err = feed.push(&OWNER, "Symbol", 50, 500).unwrap_err();
    assert_eq!(err, PriceFeedError::NonMonotonicTime { symbol: Symbol::from("Symbol"), proposed: 50, stored: 100 });
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(100, 500));

    let err = feed.push(&OWNER, "Symbol", 100, 700).unwrap_err();
    assert_eq!(err.kind(), "non_monotonic_time");
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(100, 500));
}

#[test]
fn only_owner_can_push() {
    let mut feed = feed();
    let err = feed.push(&STRANGER, "Symbol", 100, 500).unwrap_err();
    assert_eq!(err, PriceFeedError::Unauthorized { caller: STRANGER });
    assert!(!feed.is_supported("Symbol"));

    feed.push(&OWNER, "Symbol", 100, 500).unwrap();
    assert!(feed.push(&STRANGER, "Symbol", 200, 900).is_err());
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(100, 500));
}

#[test]
fn anyone_can_read() {
    let mut feed = feed();
    feed.push(&OWNER, "Symbol", 100, 500).unwrap();
    // Reads carry no caller; they only need a shared reference.
    let reader: &PriceStore<ManualClock> = &feed;
    assert!(reader.is_supported("Symbol"));
    assert_eq!(reader.latest("Symbol").unwrap().price, 500);
}

#[test]
fn future_time_tolerance() {
    let mut feed = feed();
    feed.set_current_time(1000).unwrap();

    let err = feed.push(&OWNER, "Symbol", NOW + TOLERANCE + 1, 500).unwrap_err();
    assert_eq!(
        err,
        PriceFeedError::FutureTimeExceedsTolerance { proposed: 1901, current_time: 1000, tolerance: 900 }
    );
    assert!(!feed.is_supported("Symbol"));

    feed.push(&OWNER, "Symbol", NOW + TOLERANCE, 500).unwrap();
    assert_eq!(feed.latest("Symbol").unwrap(), PriceTick::new(1900, 500));
}

#[test]
fn shared_handle_behaves_like_store() {
    let feed = SharedPriceStore::new(feed());
    let reader = feed.clone();

    feed.push(&OWNER, "Symbol", 100, 500).unwrap();
    assert_eq!(reader.latest("Symbol").unwrap(), PriceTick::new(100, 500));
    assert!(reader.push(&STRANGER, "Symbol", 200, 1).is_err());
    assert!(feed.push(&OWNER, "Symbol", 1901, 1).is_err());
    assert_eq!(reader.supported_symbols(), vec![Symbol::from("Symbol")]);
}
