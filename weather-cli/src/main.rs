//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the menu-driven session
//! - Human-friendly output formatting

use clap::Parser;
use weather_core::logging;

mod cli;
mod interactive;
mod lookup;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(if cmd.verbose {
        "weather=debug,weather_core=debug"
    } else {
        "weather=warn,weather_core=warn"
    });
    cmd.run().await
}
