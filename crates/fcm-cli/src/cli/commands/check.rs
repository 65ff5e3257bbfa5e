//! `fcm check <url>` – score a URL, show the result, save it when logged in.

use anyhow::{Context, Result};
use fcm_core::kv::KeyValueStore;
use fcm_core::Dashboard;

use super::render::print_result;

pub async fn run_check<S: KeyValueStore>(dashboard: &mut Dashboard<S>, raw: &str) -> Result<()> {
    let url = match dashboard.gate(raw) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Warning: {e}");
            return Ok(());
        }
    };

    let strategy = dashboard.strategy();
    let result = tokio::task::spawn_blocking(move || strategy.score(&url))
        .await
        .context("scoring task join")?;

    let saved = dashboard.record(result).unwrap_or_else(|e| {
        tracing::warn!("history write failed: {}", e);
        eprintln!("Warning: could not save this check to your history: {e}");
        false
    });

    if let Some(result) = dashboard.last_result() {
        print_result(result);
    }
    match dashboard.user() {
        Some(user) if saved => println!("Saved to history for {}.", user.label()),
        Some(_) => {}
        None => println!("Log in with `fcm login` to keep a history of your checks."),
    }
    Ok(())
}
