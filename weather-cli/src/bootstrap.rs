//! Process startup: logging, `.env`, configuration.
//!
//! Everything here runs once before the command is dispatched. Failures are
//! returned to `main` and end the process; nothing is retried.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{Level, debug};
use weather_core::{ClientConfig, Config, WeatherClient};

/// State resolved at startup and handed to the command dispatcher.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Config,
}

impl App {
    /// Build the client from the environment and the config file.
    pub fn client(&self) -> Result<WeatherClient> {
        Ok(build_client(ClientConfig::from_env(&self.config)?))
    }

    #[cfg(test)]
    fn client_with_env(&self, env: impl Fn(&str) -> Option<String>) -> Result<WeatherClient> {
        Ok(build_client(ClientConfig::resolve(&self.config, env)?))
    }
}

fn build_client(client_config: ClientConfig) -> WeatherClient {
    debug!(endpoint = client_config.endpoint(), "Weather client configured");
    WeatherClient::new(client_config)
}

pub fn start(verbose: bool) -> Result<App> {
    init_logging(verbose);
    load_dotenv(Path::new(".env"))?;

    let config = Config::load()?;
    Ok(App { config })
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Load `path` into the process environment. A missing file is fine.
fn load_dotenv(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded environment file");
            Ok(())
        }
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err).context("Failed to load .env file"),
    }
}
