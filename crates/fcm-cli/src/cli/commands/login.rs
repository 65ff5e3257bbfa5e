//! `fcm login` – sign in through the configured identity provider.

use anyhow::{Context, Result};
use fcm_core::kv::KeyValueStore;
use fcm_core::Dashboard;

pub fn run_login<S: KeyValueStore>(dashboard: &mut Dashboard<S>) -> Result<()> {
    if let Some(user) = dashboard.user() {
        println!("Already logged in as {}. Run `fcm logout` first.", user.label());
        return Ok(());
    }
    let user = dashboard.login().context("login failed")?;
    let saved = dashboard.history().map(<[_]>::len).unwrap_or(0);
    println!("Logged in as {} ({} saved checks).", user.label(), saved);
    Ok(())
}
