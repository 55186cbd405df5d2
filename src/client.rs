use crate::error::{ForksError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Milliseconds in one unit of the CLI timeout multiplier.
pub const TIMEOUT_UNIT_MS: u64 = 100;

/// Convert a CLI timeout multiplier into a request timeout.
/// Zero or negative means no timeout; huge values saturate.
pub fn timeout_from_multiplier(units: i64) -> Option<Duration> {
    if units <= 0 {
        return None;
    }

    Some(Duration::from_millis(
        (units as u64).saturating_mul(TIMEOUT_UNIT_MS),
    ))
}

/// Caller side of the forks summary service.
pub struct ForksClient {
    client: Client,
    base_url: Url,
}

impl ForksClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("forkscount/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ForksClient {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Ask the service for the summary of the last `count` projects and return
    /// the body re-indented for display.
    pub async fn fetch_latest(&self, count: i64, timeout: Option<Duration>) -> Result<String> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("n", &count.to_string());

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        debug!(%url, ?timeout, "requesting latest projects summary");
        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            return Err(ForksError::HttpStatusError(response.status().to_string()));
        }

        let body = response.bytes().await?;
        indent_json(&body)
    }
}

/// Re-indent a JSON document with two spaces, keeping key order.
pub fn indent_json(data: &[u8]) -> Result<String> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
