//! Email/password sign-in against a hosted identity provider REST endpoint.
//!
//! Request: `POST {endpoint}?key={api_key}` with
//! `{"email", "password", "returnSecureToken": true}`.
//! Response fields used: `localId`, `email`, `displayName`.

use serde::Deserialize;
use serde_json::json;
use std::io::{BufRead, Write};

use super::prompt::Prompt;
use super::{Identity, IdentityProvider, SessionError, UserProfile};
use crate::config::ProviderConfig;
use crate::http::{self, HttpTimeouts};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

pub struct PasswordProvider<R, W> {
    sign_in_url: url::Url,
    timeouts: HttpTimeouts,
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> PasswordProvider<R, W> {
    pub fn new(
        cfg: &ProviderConfig,
        timeouts: HttpTimeouts,
        input: R,
        output: W,
    ) -> Result<Self, SessionError> {
        let sign_in_url =
            url::Url::parse_with_params(&cfg.endpoint, &[("key", cfg.api_key.as_str())])?;
        Ok(Self {
            sign_in_url,
            timeouts,
            prompt: Prompt::new(input, output),
        })
    }

    /// Exchange credentials for a profile.
    pub fn exchange(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let resp = http::post_json(self.sign_in_url.as_str(), &body, self.timeouts)?;
        if !resp.is_success() {
            return Err(SessionError::Provider {
                code: resp.code,
                message: provider_message(&resp.body),
            });
        }
        let parsed: SignInResponse = serde_json::from_slice(&resp.body)?;
        Ok(UserProfile {
            uid: Identity::new(parsed.local_id),
            display_name: parsed.display_name.filter(|s| !s.is_empty()),
            email: parsed.email.or_else(|| Some(email.to_string())),
        })
    }
}

/// Pull `error.message` out of an error body, else the body text.
fn provider_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

impl<R: BufRead, W: Write> IdentityProvider for PasswordProvider<R, W> {
    fn name(&self) -> &'static str {
        "password"
    }

    fn sign_in(&mut self) -> Result<UserProfile, SessionError> {
        let email = self.prompt.ask("Email")?.ok_or(SessionError::Cancelled)?;
        let password = self.prompt.ask("Password")?.ok_or(SessionError::Cancelled)?;
        self.exchange(&email, &password)
    }
}
