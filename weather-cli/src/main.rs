//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Startup: logging, `.env`, configuration
//! - Human-friendly output formatting

use clap::Parser;

mod bootstrap;
mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let app = bootstrap::start(cmd.verbose)?;
    cmd.run(&app).await
}
