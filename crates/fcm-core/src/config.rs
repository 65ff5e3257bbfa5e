use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the scoring API base URL.
pub const API_URL_ENV: &str = "FCM_API_URL";

/// Base URL used when neither the environment nor the config file sets one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default bound on stored history entries per identity.
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// How a URL is turned into a check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// POST to `{api_base_url}/detect/url`.
    #[default]
    Remote,
    /// Local random score; no network.
    Simulated,
}

/// Where the signed-in identity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Prompt for a name; the name is the identity.
    #[default]
    Local,
    /// Email/password exchange with the configured identity provider.
    Password,
}

/// Identity provider settings (optional `[provider]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Sign-in endpoint, e.g. `https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword`.
    pub endpoint: String,
    /// Public API key appended as `?key=`.
    pub api_key: String,
}

/// Global configuration loaded from `~/.config/fcm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmConfig {
    /// Scoring API base URL. `FCM_API_URL` takes precedence.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Scoring strategy: "remote" (default) or "simulated".
    #[serde(default)]
    pub scoring: ScoringMode,
    /// Session provider: "local" (default) or "password".
    #[serde(default)]
    pub session: SessionMode,
    /// Maximum history entries kept per identity; 0 = unbounded.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
    /// Connect timeout for HTTP requests in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total timeout for HTTP requests in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Required when `session = "password"`.
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            scoring: ScoringMode::Remote,
            session: SessionMode::Local,
            history_cap: DEFAULT_HISTORY_CAP,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            provider: None,
        }
    }
}

impl FcmConfig {
    /// History bound as an option; `None` when unbounded.
    pub fn history_cap(&self) -> Option<usize> {
        (self.history_cap > 0).then_some(self.history_cap)
    }

    /// Resolve the scoring API base URL: `FCM_API_URL`, then config, then default.
    pub fn api_base_url(&self) -> Result<String> {
        let env = std::env::var(API_URL_ENV).ok();
        resolve_api_base_url(env.as_deref(), self.api_base_url.as_deref())
    }
}

/// Pick the first non-blank candidate and check that it parses as an absolute URL.
/// A trailing slash is stripped so endpoint paths can be appended directly.
pub fn resolve_api_base_url(env: Option<&str>, configured: Option<&str>) -> Result<String> {
    let raw = [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);
    url::Url::parse(raw).with_context(|| format!("invalid scoring API base URL: {raw}"))?;
    Ok(raw.trim_end_matches('/').to_string())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fcm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FcmConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<FcmConfig> {
    if !path.exists() {
        let default_cfg = FcmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FcmConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
