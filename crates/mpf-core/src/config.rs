//! Configuration parsing for the price feed.
//!
//! The runner reads its settings from a single JSON config file: logging
//! metadata, the owner identity allowed to publish, the future-time tolerance,
//! and which clock the store should use.
//!
//! # Example config
//!
//! ```json
//! {
//!   "PriceFeed": { "module_name": "manual_price_feed", "log_path": "/tmp/log" },
//!   "owner": "0x0101010101010101010101010101010101010101010101010101010101010101",
//!   "tolerance_sec": 900,
//!   "clock": { "mode": "manual", "start_time": 1000 }
//! }
//! ```

use anyhow::Context;
use serde::Deserialize;

use crate::{error::PriceFeedError, types::Identity};

/// Tolerance applied when `tolerance_sec` is omitted.
pub const DEFAULT_TOLERANCE_SEC: u64 = 900;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    #[serde(rename = "PriceFeed")]
    pub price_feed: Option<ModuleMeta>,

    /// The only identity allowed to push prices.
    pub owner: Identity,

    /// Maximum lead, in seconds, of a publish time over the current time.
    #[serde(default = "default_tolerance")]
    pub tolerance_sec: u64,

    #[serde(default)]
    pub clock: ClockConfig,
}

fn default_tolerance() -> u64 {
    DEFAULT_TOLERANCE_SEC
}

impl AppConfig {
    /// Returns the module name, defaulting to `"manual_price_feed"`.
    pub fn module_name(&self) -> String {
        self.price_feed
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| "manual_price_feed".to_string())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.price_feed.as_ref().and_then(|m| m.log_path.clone())
    }

    /// Reject configs that parse but cannot describe a usable feed.
    pub fn validate(&self) -> Result<(), PriceFeedError> {
        if self.owner.as_bytes().iter().all(|&b| b == 0) {
            return Err(PriceFeedError::Config("owner must not be the zero identity".into()));
        }
        Ok(())
    }
}

/// Module metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

/// Which clock the store reads "current time" from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ClockConfig {
    /// Real wall-clock time.
    #[default]
    System,
    /// A clock pinned to `start_time` that moves only via `set_time`.
    Manual {
        #[serde(default)]
        start_time: u64,
    },
}

/// Parse and validate a JSON config string.
///
/// Every failure, malformed JSON and bad owner included, is reported as
/// [`PriceFeedError::Config`].
pub fn parse_config(content: &str) -> Result<AppConfig, PriceFeedError> {
    let config: AppConfig =
        serde_json::from_str(content).map_err(|e| PriceFeedError::Config(format!("invalid config: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load, parse, and validate a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PriceFeedError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = parse_config(&content).with_context(|| format!("loading {}", path.display()))?;
    Ok(config)
}
