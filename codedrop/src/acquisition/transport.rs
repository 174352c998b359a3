//! HTTP transport abstraction for testability.

use std::time::Duration;

use reqwest::blocking::Client;

use super::error::{AcquisitionError, AcquisitionResult};

/// Default timeout for acquisition requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimal HTTP surface used by the acquisition client.
///
/// Allows mock transports in tests.
pub trait HttpTransport: Send + Sync {
    /// GET `url`, returning the response body.
    fn get(&self, url: &str) -> AcquisitionResult<Vec<u8>>;

    /// POST a JSON body to `url`.
    fn post_json(&self, url: &str, body: &serde_json::Value) -> AcquisitionResult<()>;
}

/// Transport backed by a blocking reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> AcquisitionResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> AcquisitionResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AcquisitionError::InvalidRequest(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

fn send_error(url: &str, e: reqwest::Error) -> AcquisitionError {
    if e.is_timeout() {
        AcquisitionError::Timeout {
            url: url.to_string(),
        }
    } else {
        AcquisitionError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> AcquisitionResult<Vec<u8>> {
        let response = self.client.get(url).send().map_err(|e| send_error(url, e))?;

        if !response.status().is_success() {
            return Err(AcquisitionError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| send_error(url, e))
    }

    fn post_json(&self, url: &str, body: &serde_json::Value) -> AcquisitionResult<()> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| send_error(url, e))?;

        if !response.status().is_success() {
            return Err(AcquisitionError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
