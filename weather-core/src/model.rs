use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by the weather service, kept exactly as received.
///
/// The provider's schema (temperature, conditions, location metadata...) is not
/// modelled here; callers that care about specific fields look them up themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherPayload(Value);

impl WeatherPayload {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for WeatherPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Status and body of a single HTTP exchange, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
