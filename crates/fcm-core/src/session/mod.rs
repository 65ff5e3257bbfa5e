//! Session gate: who (if anyone) is signed in.
//!
//! The identity only changes on an explicit `login` or `logout`. The signed-in
//! profile is kept in the key-value store under [`SESSION_KEY`] so it survives
//! between CLI invocations, the way a browser SDK keeps its auth state.

mod local;
mod password;
mod profile;
mod prompt;

pub use local::LocalPromptProvider;
pub use password::PasswordProvider;
pub use profile::{Identity, UserProfile};
pub use prompt::Prompt;

use std::io::{BufRead, Write};
use thiserror::Error;

use crate::config::{FcmConfig, SessionMode};
use crate::http::HttpTimeouts;
use crate::kv::{KeyValueStore, StoreError};

/// Store key holding the signed-in profile.
pub const SESSION_KEY: &str = "fcm_session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("sign-in cancelled")]
    Cancelled,
    #[error("identity provider rejected sign-in ({code}): {message}")]
    Provider { code: u32, message: String },
    #[error("identity provider unreachable: {0}")]
    Transport(#[from] curl::Error),
    #[error("unexpected identity provider response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid identity provider endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("identity provider not configured: add a [provider] section to config.toml")]
    NotConfigured,
    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub trait IdentityProvider {
    fn name(&self) -> &'static str;

    /// Interactive, user-initiated, may be cancelled.
    fn sign_in(&mut self) -> Result<UserProfile, SessionError>;

    fn sign_out(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Build the configured provider, prompting on `input`/`output`.
pub fn provider_from_config<R, W>(
    cfg: &FcmConfig,
    input: R,
    output: W,
) -> Result<Box<dyn IdentityProvider>, SessionError>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    let provider: Box<dyn IdentityProvider> = match cfg.session {
        SessionMode::Local => Box::new(LocalPromptProvider::new(input, output)),
        SessionMode::Password => {
            let pcfg = cfg.provider.as_ref().ok_or(SessionError::NotConfigured)?;
            Box::new(PasswordProvider::new(pcfg, HttpTimeouts::from(cfg), input, output)?)
        }
    };
    Ok(provider)
}

pub struct SessionGate<S> {
    provider: Box<dyn IdentityProvider>,
    store: S,
    current: Option<UserProfile>,
}

impl<S: KeyValueStore> SessionGate<S> {
    /// Starts signed out; call [`restore`](Self::restore) to pick up a saved session.
    pub fn new(provider: Box<dyn IdentityProvider>, store: S) -> Self {
        Self {
            provider,
            store,
            current: None,
        }
    }

    /// Load the saved profile, if any. Unreadable or malformed data means signed out.
    pub fn restore(&mut self) -> Option<&UserProfile> {
        self.current = match self.store.get(SESSION_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("ignoring malformed saved session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("could not read saved session: {}", e);
                None
            }
        };
        self.current.as_ref()
    }

    /// Run the provider's sign-in. On failure the previous state is kept.
    pub fn login(&mut self) -> Result<&UserProfile, SessionError> {
        let profile = self.provider.sign_in().map_err(|e| {
            tracing::warn!(provider = self.provider.name(), "login failed: {}", e);
            e
        })?;
        let json = serde_json::to_string(&profile)?;
        self.store.set(SESSION_KEY, &json)?;
        tracing::info!(provider = self.provider.name(), uid = %profile.uid, "logged in");
        Ok(&*self.current.insert(profile))
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.provider.sign_out()?;
        self.store.remove(SESSION_KEY)?;
        if let Some(p) = self.current.take() {
            tracing::info!(uid = %p.uid, "logged out");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(|p| &p.uid)
    }
}
