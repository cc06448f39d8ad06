//! # mpf-runner
//!
//! Administrative console for a manually published price feed.
//!
//! Loads a JSON configuration file, builds the store with the configured owner,
//! tolerance, and clock, then executes newline-delimited JSON commands from
//! stdin and writes one JSON response per command to stdout. See
//! [`command`] for the protocol.
//!
//! # Usage
//!
//! ```bash
//! mpf-runner config.json --log-level info < commands.jsonl
//! ```

mod command;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mpf_core::ConfiguredClock;
use mpf_store::{PriceStore, SharedPriceStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Manual Price Feed Console.
#[derive(Parser)]
#[command(name = "mpf-runner", about = "Manual Price Feed Console")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output (overrides the config's `log_path`).
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration (logging needs its module name and log path)
    let config = mpf_core::config::load_config(&cli.config)?;

    // 2. Initialize logging
    let module_name = config.module_name();
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    mpf_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &module_name);

    info!("mpf-runner starting — config={}, log_level={}", cli.config.display(), cli.log_level);

    // 3. Build the store
    let clock = ConfiguredClock::from_config(&config.clock);
    let settable_clock = clock.is_settable();
    let store = SharedPriceStore::new(PriceStore::new(config.owner, config.tolerance_sec, clock));
    info!(
        "feed '{module_name}' ready — owner={}, tolerance={}s, settable_clock={settable_clock}",
        store.owner(),
        store.tolerance(),
    );

    // 4. Serve commands until stdin closes or Ctrl+C. Lines are read as raw
    // bytes so a non-UTF-8 line is answered with a parse error.
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut buf = Vec::with_capacity(1024);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            n = stdin.read_until(b'\n', &mut buf) => {
                if n? == 0 {
                    info!("stdin closed");
                    break;
                }
                let response = command::handle_bytes(&store, &buf);
                buf.clear();
                let Some(response) = response else {
                    continue;
                };
                debug!(?response, "command handled");
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
            }
            signal = &mut shutdown => {
                signal?;
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!("{} symbol(s) supported at exit — goodbye", store.len());
    Ok(())
}
