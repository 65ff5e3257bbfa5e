//! Blocking JSON POST over libcurl, shared by the scoring client and the
//! identity provider.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use curl::easy::{Easy, List};
use std::time::Duration;

use crate::config::FcmConfig;

#[derive(Debug, Clone, Copy)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub total: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            total: Duration::from_secs(30),
        }
    }
}

impl From<&FcmConfig> for HttpTimeouts {
    fn from(cfg: &FcmConfig) -> Self {
        Self {
            connect: Duration::from_secs(cfg.connect_timeout_secs),
            total: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub code: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Body as text, lossy, for diagnostics.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// POST `body` as `application/json` and collect the response.
/// Any HTTP status is returned as `Ok`; only transport failures are `Err`.
/// Redirects are not followed, so a 3xx comes back as-is.
pub fn post_json(
    url: &str,
    body: &serde_json::Value,
    timeouts: HttpTimeouts,
) -> Result<HttpResponse, curl::Error> {
    let payload = body.to_string();
    let mut response_body: Vec<u8> = Vec::new();

    let mut easy = Easy::new();
    easy.url(url)?;
    easy.post(true)?;
    easy.post_fields_copy(payload.as_bytes())?;
    easy.connect_timeout(timeouts.connect)?;
    easy.timeout(timeouts.total)?;

    let mut list = List::new();
    list.append("Content-Type: application/json")?;
    list.append("Accept: application/json")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            response_body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    tracing::debug!(url, code, bytes = response_body.len(), "POST complete");
    Ok(HttpResponse {
        code,
        body: response_body,
    })
}
