//! Scoring strategies: turn a URL into a [`CheckResult`].
//!
//! The strategy is picked once from config and injected; callers never branch
//! on which one they hold.

mod normalize;
mod remote;
mod simulated;

pub use normalize::{normalize, Normalized};
pub use remote::{RemoteError, RemoteScoringStrategy, DETECT_URL_PATH};
pub use simulated::{simulate, SimulatedScoringStrategy, SCORE_RANGE};

use anyhow::Result;
use std::sync::Arc;

use crate::config::{FcmConfig, ScoringMode};
use crate::http::HttpTimeouts;
use crate::result::CheckResult;

pub trait ScoringStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Score one URL. Failures come back as an `Error`-status result, never as a panic.
    fn score(&self, url: &str) -> CheckResult;
}

/// Build the configured strategy.
pub fn from_config(cfg: &FcmConfig) -> Result<Arc<dyn ScoringStrategy>> {
    let strategy: Arc<dyn ScoringStrategy> = match cfg.scoring {
        ScoringMode::Remote => Arc::new(RemoteScoringStrategy::new(
            &cfg.api_base_url()?,
            HttpTimeouts::from(cfg),
        )),
        ScoringMode::Simulated => Arc::new(SimulatedScoringStrategy::new()),
    };
    tracing::debug!(strategy = strategy.name(), "scoring strategy selected");
    Ok(strategy)
}
