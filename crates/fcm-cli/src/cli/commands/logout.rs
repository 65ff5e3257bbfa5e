//! `fcm logout` – sign out; saved history is kept.

use anyhow::{Context, Result};
use fcm_core::kv::KeyValueStore;
use fcm_core::Dashboard;

pub fn run_logout<S: KeyValueStore>(dashboard: &mut Dashboard<S>) -> Result<()> {
    if dashboard.user().is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    dashboard.logout().context("logout failed")?;
    println!("Logged out.");
    Ok(())
}
