use tracing::{debug, instrument, warn};

use crate::{
    config::ClientConfig,
    error::WeatherError,
    model::WeatherPayload,
    transport::{HttpTransport, ReqwestTransport},
};

/// Unit system requested from the service: Fahrenheit and mph.
pub const UNITS: &str = "imperial";

/// Looks up current weather for a free-text location.
///
/// Every [`fetch`](Self::fetch) issues exactly one request. The client keeps no
/// state between calls, so it can be shared or cloned freely across tasks.
#[derive(Debug, Clone)]
pub struct WeatherClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl WeatherClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> WeatherClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the current weather for `query` and return the body as received.
    ///
    /// The query is sent as-is, empty strings included. Failures are returned
    /// unchanged: no retry, no fallback value.
    #[instrument(level = "debug", skip(self), fields(endpoint = %self.config.endpoint()))]
    pub async fn fetch(&self, query: &str) -> Result<WeatherPayload, WeatherError> {
        debug!("Requesting current weather");

        let res = self
            .transport
            .get(
                self.config.endpoint(),
                &[
                    ("q", query),
                    ("units", UNITS),
                    ("APPID", self.config.api_key()),
                ],
            )
            .await?;

        debug!(status = %res.status, "Weather service responded");

        if !res.status.is_success() {
            warn!(status = %res.status, "Weather request failed");
            return Err(WeatherError::Status {
                status: res.status,
                body: truncate_body(&res.body),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&res.body)?;

        Ok(WeatherPayload::from(value))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
