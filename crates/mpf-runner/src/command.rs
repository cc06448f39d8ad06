//! JSON-line command protocol of the admin console.
//!
//! Each input line is one [`Command`], tagged by `op`:
//!
//! ```text
//! {"op":"push","caller":"0x01…01","symbol":"BTC","publish_time":100,"price":500}
//! {"op":"latest","symbol":"BTC"}
//! {"op":"latest","symbol":"BTC","max_age":60}
//! {"op":"supported","symbol":"BTC"}
//! {"op":"set_time","time":1000}
//! {"op":"symbols"}
//! ```
//!
//! Each command produces exactly one [`Response`], tagged by `status`.
//! Blank lines and lines starting with `#` are ignored. Lines that are not
//! valid UTF-8 or not a valid command get a `parse` error response.

use mpf_core::{Identity, PriceFeedError, Symbol, TimeSource};
use mpf_store::SharedPriceStore;
use serde::{Deserialize, Serialize};

/// A console command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Push { caller: Identity, symbol: Symbol, publish_time: u64, price: i64 },
    Latest {
        symbol: Symbol,
        #[serde(default)]
        max_age: Option<u64>,
    },
    Supported { symbol: Symbol },
    SetTime { time: u64 },
    Symbols,
}

/// Result of one command, written as a JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Tick { symbol: Symbol, publish_time: u64, price: i64 },
    Supported { symbol: Symbol, supported: bool },
    Symbols { symbols: Vec<Symbol> },
    Error { kind: &'static str, message: String },
}

impl From<PriceFeedError> for Response {
    fn from(e: PriceFeedError) -> Self {
        Self::Error { kind: e.kind(), message: e.to_string() }
    }
}

/// Parse one input line into a command.
pub fn parse_line(line: &str) -> Result<Command, PriceFeedError> {
    serde_json::from_str(line).map_err(|e| PriceFeedError::Parse(e.to_string()))
}

/// Execute a command against the store.
pub fn execute<C: TimeSource>(store: &SharedPriceStore<C>, cmd: Command) -> Response {
    let result = match cmd {
        Command::Push { caller, symbol, publish_time, price } => {
            store.push(&caller, &symbol, publish_time, price).map(|()| Response::Ok)
        }
        Command::Latest { symbol, max_age } => {
            let tick = match max_age {
                Some(max_age) => store.latest_no_older_than(&symbol, max_age),
                None => store.latest(&symbol),
            };
            tick.map(|t| Response::Tick { symbol, publish_time: t.publish_time, price: t.price })
        }
        Command::Supported { symbol } => {
            let supported = store.is_supported(&symbol);
            Ok(Response::Supported { symbol, supported })
        }
        Command::SetTime { time } => store.set_current_time(time).map(|()| Response::Ok),
        Command::Symbols => Ok(Response::Symbols { symbols: store.supported_symbols() }),
    };
    result.unwrap_or_else(Response::from)
}

/// Parse and execute one input line. Returns `None` for blank and comment
/// lines.
pub fn handle_line<C: TimeSource>(store: &SharedPriceStore<C>, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(match parse_line(line) {
        Ok(cmd) => execute(store, cmd),
        Err(e) => e.into(),
    })
}

/// As [`handle_line`], for a raw input line that may not be UTF-8.
pub fn handle_bytes<C: TimeSource>(store: &SharedPriceStore<C>, line: &[u8]) -> Option<Response> {
    match std::str::from_utf8(line) {
        Ok(line) => handle_line(store, line),
        Err(e) => Some(PriceFeedError::Parse(format!("input line is not valid UTF-8: {e}")).into()),
    }
}

#[cfg(test)]
mod tests {
    use mpf_core::{ManualClock, SystemClock};
    use mpf_store::PriceStore;

    use super::*;

    const OWNER: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";
    const OTHER: &str = "0x0202020202020202020202020202020202020202020202020202020202020202";

    fn store() -> SharedPriceStore<ManualClock> {
        let owner = OWNER.parse().unwrap();
        SharedPriceStore::new(PriceStore::new(owner, 900, ManualClock::new(1000)))
    }

    fn run(store: &SharedPriceStore<ManualClock>, line: &str) -> Response {
        handle_line(store, line).unwrap()
    }

    fn push_line(caller: &str, symbol: &str, publish_time: u64, price: i64) -> String {
        format!(
            r#"{{"op":"push","caller":"{caller}","symbol":"{symbol}","publish_time":{publish_time},"price":{price}}}"#
        )
    }

    #[test]
    fn parses_every_op() {
        assert_eq!(
            parse_line(&push_line(OWNER, "BTC", 100, -5)).unwrap(),
            Command::Push { caller: OWNER.parse().unwrap(), symbol: "BTC".into(), publish_time: 100, price: -5 }
        );
        assert_eq!(
            parse_line(r#"{"op":"latest","symbol":"BTC"}"#).unwrap(),
            Command::Latest { symbol: "BTC".into(), max_age: None }
        );
        assert_eq!(
            parse_line(r#"{"op":"latest","symbol":"BTC","max_age":60}"#).unwrap(),
            Command::Latest { symbol: "BTC".into(), max_age: Some(60) }
        );
        assert_eq!(
            parse_line(r#"{"op":"supported","symbol":[0,255]}"#).unwrap(),
            Command::Supported { symbol: Symbol::from(vec![0, 255]) }
        );
        assert_eq!(parse_line(r#"{"op":"set_time","time":1000}"#).unwrap(), Command::SetTime { time: 1000 });
        assert_eq!(parse_line(r#"{"op":"symbols"}"#).unwrap(), Command::Symbols);
    }

    #[test]
    fn malformed_lines_are_parse_errors() {
        let store = store();
        for line in ["not json", r#"{"op":"explode"}"#, r#"{"op":"push","symbol":"BTC"}"#] {
            match run(&store, line) {
                Response::Error { kind, .. } => assert_eq!(kind, "parse"),
                other => panic!("expected parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let store = store();
        assert_eq!(handle_line(&store, "   "), None);
        assert_eq!(handle_line(&store, "# seed prices"), None);
    }

    #[test]
    fn push_then_query() {
        let store = store();
        assert_eq!(run(&store, &push_line(OWNER, "BTC", 100, 500)), Response::Ok);
        assert_eq!(
            run(&store, r#"{"op":"latest","symbol":"BTC"}"#),
            Response::Tick { symbol: "BTC".into(), publish_time: 100, price: 500 }
        );
        assert_eq!(
            run(&store, r#"{"op":"supported","symbol":"ETH"}"#),
            Response::Supported { symbol: "ETH".into(), supported: false }
        );
        assert_eq!(run(&store, r#"{"op":"symbols"}"#), Response::Symbols { symbols: vec!["BTC".into()] });
    }

    #[test]
    fn store_errors_carry_kind() {
        let store = store();
        let kind_of = |r: Response| match r {
            Response::Error { kind, .. } => kind,
            other => panic!("expected error, got {other:?}"),
        };
        assert_eq!(kind_of(run(&store, r#"{"op":"latest","symbol":"BTC"}"#)), "unsupported_symbol");
        assert_eq!(kind_of(run(&store, &push_line(OTHER, "BTC", 100, 500))), "unauthorized");
        assert_eq!(kind_of(run(&store, &push_line(OWNER, "BTC", 1901, 500))), "future_time_exceeds_tolerance");
        assert_eq!(run(&store, &push_line(OWNER, "BTC", 1900, 500)), Response::Ok);
        assert_eq!(kind_of(run(&store, &push_line(OWNER, "BTC", 50, 500))), "non_monotonic_time");
        assert_eq!(run(&store, r#"{"op":"set_time","time":5000}"#), Response::Ok);
        assert_eq!(kind_of(run(&store, r#"{"op":"latest","symbol":"BTC","max_age":60}"#)), "stale_price");
    }

    #[test]
    fn set_time_on_system_clock_fails() {
        let owner: Identity = OWNER.parse().unwrap();
        let store = SharedPriceStore::new(PriceStore::new(owner, 900, SystemClock));
        match handle_line(&store, r#"{"op":"set_time","time":1000}"#) {
            Some(Response::Error { kind, .. }) => assert_eq!(kind, "clock_not_settable"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn responses_serialize_tagged() {
        let tick = Response::Tick { symbol: "BTC".into(), publish_time: 100, price: 500 };
        assert_eq!(
            serde_json::to_string(&tick).unwrap(),
            r#"{"status":"tick","symbol":"BTC","publish_time":100,"price":500}"#
        );
        assert_eq!(serde_json::to_string(&Response::Ok).unwrap(), r#"{"status":"ok"}"#);
    }

    #[test]
    fn non_utf8_line_is_a_parse_error_and_console_continues() {
        let store = store();
        assert_eq!(handle_bytes(&store, push_line(OWNER, "BTC", 100, 500).as_bytes()), Some(Response::Ok));
        match handle_bytes(&store, b"garbage \xff\xfe\n") {
            Some(Response::Error { kind, .. }) => assert_eq!(kind, "parse"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(
            handle_bytes(&store, b"{\"op\":\"latest\",\"symbol\":\"BTC\"}\n"),
            Some(Response::Tick { symbol: "BTC".into(), publish_time: 100, price: 500 })
        );
        assert_eq!(handle_bytes(&store, b"\n"), None);
    }
}
