//! Last-Touch Attribution CLI
//!
//! Credits each sale to the user's most recent prior ad exposure and writes a
//! per-exposure summary table.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --exposures ad_exposures.csv --sales sales_data.csv --output summary.csv
//! cargo run -- --include-unattributed -v
//! ```
//!
//! Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
//!
//! # Exit Codes
//!
//! - 0: Success, summary fully written
//! - 1: Error (unreadable source, malformed row, invalid amount, write failure)

use last_touch_attribution::{cli, pipeline};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.to_run_config();
    if let Err(e) = pipeline::run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
