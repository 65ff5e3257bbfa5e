//! Scoring via the remote detection API (`POST {base}/detect/url`).

use serde_json::{json, Value};
use thiserror::Error;

use super::normalize::normalize;
use super::ScoringStrategy;
use crate::http::{self, HttpTimeouts};
use crate::result::CheckResult;

/// Path of the URL detection endpoint, relative to the API base URL.
pub const DETECT_URL_PATH: &str = "/detect/url";

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Non-2xx response; body kept as text for diagnostics.
    #[error("server error {code}: {body}")]
    Status { code: u32, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RemoteScoringStrategy {
    endpoint: String,
    timeouts: HttpTimeouts,
}

impl RemoteScoringStrategy {
    /// `base_url` without a trailing slash, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), DETECT_URL_PATH),
            timeouts,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the URL and return the decoded JSON payload.
    pub fn request(&self, url: &str) -> Result<Value, RemoteError> {
        let resp = http::post_json(&self.endpoint, &json!({ "url": url }), self.timeouts)?;
        if !resp.is_success() {
            return Err(RemoteError::Status {
                code: resp.code,
                body: resp.text(),
            });
        }
        let raw: Value = serde_json::from_slice(&resp.body)?;
        tracing::debug!(url, "raw backend response: {}", raw);
        Ok(raw)
    }

    /// Request and normalize, keeping the payload on the result.
    pub fn check(&self, url: &str) -> Result<CheckResult, RemoteError> {
        let raw = self.request(url)?;
        let n = normalize(&raw);
        let echoed = n.url.unwrap_or_else(|| url.to_string());
        Ok(CheckResult::new(echoed, n.score, n.status).with_raw(raw))
    }
}

impl ScoringStrategy for RemoteScoringStrategy {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn score(&self, url: &str) -> CheckResult {
        match self.check(url) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(url, endpoint = %self.endpoint, "remote scoring failed: {}", e);
                CheckResult::error(url, e)
            }
        }
    }
}
