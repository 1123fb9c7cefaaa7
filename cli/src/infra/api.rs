//! Blocking HTTP transport to the orchestration platform.

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::application::ports::ApiTransport;
use crate::domain::{ApiConfig, ApiError};

/// `ureq`-backed implementation of [`ApiTransport`].
///
/// Every request carries the basic-auth credential pair and JSON
/// content-type headers; non-2xx responses map to
/// [`ApiError::Status`] with the raw body. No retries.
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let token = BASE64.encode(format!("{}:{}", config.access_key, config.secret_key));
        Self {
            agent: ureq::Agent::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: format!("Basic {token}"),
        }
    }

    fn request(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        let request = self
            .agent
            .request(method, &url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let result = match body {
            Some(json) => request.send_json(json.clone()),
            None => request.call(),
        };
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(ApiError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                }
                .into());
            }
            Err(err) => {
                return Err(ApiError::Transport {
                    url,
                    reason: err.to_string(),
                }
                .into());
            }
        };

        let text = response
            .into_string()
            .with_context(|| format!("failed to read response from {url}"))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .with_context(|| format!("response from {url} is not valid JSON"))
    }
}

impl ApiTransport for HttpTransport {
    fn get(&self, path: &str) -> Result<Value> {
        self.request("GET", path, None)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request("POST", path, Some(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request("PUT", path, Some(body))
    }
}
