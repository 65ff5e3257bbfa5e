//! `fcm history` – the dashboard: saved checks for the signed-in user.

use anyhow::Result;
use fcm_core::kv::KeyValueStore;
use fcm_core::Dashboard;

use super::render::{format_checked_at, format_score, format_status};

pub fn run_history<S: KeyValueStore>(dashboard: &Dashboard<S>) -> Result<()> {
    let Some(user) = dashboard.user() else {
        println!("You are not logged in. Run `fcm login` to see your saved URL checks here.");
        return Ok(());
    };
    println!("Logged in as: {}", user.label());

    let entries = dashboard.history()?;
    if entries.is_empty() {
        println!(
            "No URL checks saved yet. When you check a URL while logged in it will be stored here."
        );
        return Ok(());
    }

    println!(
        "{:<4} {:<12} {:<6} {:<19} {}",
        "#", "STATUS", "SCORE", "CHECKED", "URL"
    );
    for (i, r) in entries.iter().enumerate() {
        println!(
            "{:<4} {:<12} {:<6} {:<19} {}",
            i + 1,
            format_status(r.status.as_ref()),
            format_score(r.score),
            format_checked_at(r),
            r.url
        );
    }
    Ok(())
}
