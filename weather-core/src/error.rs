use reqwest::StatusCode;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by [`WeatherClient`](crate::WeatherClient) and the credential resolution.
///
/// Nothing here is recovered locally: every variant surfaces to the caller as-is.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request never produced a response (connect, TLS, read failure).
    #[error("Request to weather service failed: {0}")]
    Transport(#[source] BoxError),

    /// The service answered with a non-success status.
    #[error("Weather service returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not valid JSON.
    #[error("Failed to decode weather service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WeatherError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// True for failures of the HTTP exchange itself, including non-success statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    /// The request URL carries the `APPID` credential, so it is stripped here.
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.without_url())
    }
}
