use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{error::WeatherError, model::RawResponse};

/// Performs one HTTP GET and hands back the status and body untouched.
///
/// Interpreting the status and decoding the body is the client's job, so a
/// test double only has to return canned [`RawResponse`]s.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse, WeatherError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse, WeatherError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        Ok(RawResponse { status, body })
    }
}
