//! Binary crate for the `waybar-weather` status bar module.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging to stderr, keeping stdout for Waybar
//! - Printing exactly one JSON object per run

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = match cli::Cli::try_parse() {
        Ok(cmd) => cmd,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(cli::parse_error_status(err.kind()));
        }
    };

    let output = cmd.run().await;
    match serde_json::to_string(&output) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!("failed to serialize output: {err}"),
    }

    ExitCode::SUCCESS
}
