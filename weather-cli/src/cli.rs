use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use inquire::{Password, PasswordDisplayMode};

use crate::{bootstrap::App, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key in the config file.
    Configure,

    /// Show current weather for one or more locations.
    Show {
        /// Location names, e.g. "Boston" or "London,uk".
        #[arg(required = true)]
        locations: Vec<String>,

        /// Print the raw service response instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self, app: &App) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(app),
            Command::Show { locations, json } => show(app, &locations, json).await,
        }
    }
}

async fn show(app: &App, locations: &[String], json: bool) -> anyhow::Result<()> {
    let client = app.client()?;

    let results = join_all(locations.iter().map(|location| client.fetch(location))).await;

    let mut failed = 0;
    for (location, result) in locations.iter().zip(results) {
        match result {
            Ok(payload) if json => println!("{}", render::json(&payload)?),
            Ok(payload) => println!("{}", render::summary(&payload)),
            Err(err) => {
                failed += 1;
                eprintln!("{location}: {err}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} lookups failed", locations.len());
    }

    Ok(())
}

fn configure(app: &App) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    let mut config = app.config.clone();
    config.set_api_key(api_key.to_owned());
    let path = config.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}
