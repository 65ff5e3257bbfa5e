//! `fcm remove <position>` – delete one saved check.

use anyhow::Result;
use fcm_core::kv::KeyValueStore;
use fcm_core::{Dashboard, DashboardError};

/// `position` is 1-based, as shown by `fcm history`.
pub fn run_remove<S: KeyValueStore>(dashboard: &mut Dashboard<S>, position: u64) -> Result<()> {
    println!("{}", remove_message(dashboard, position)?);
    Ok(())
}

/// Remove the entry and describe what happened. Without a user nothing is removed.
pub(crate) fn remove_message<S: KeyValueStore>(
    dashboard: &mut Dashboard<S>,
    position: u64,
) -> Result<String> {
    let index = usize::try_from(position.saturating_sub(1))?;
    let message = match dashboard.remove_history_item(index) {
        Ok(Some(removed)) => format!("Removed #{position}: {}", removed.url),
        Ok(None) => format!("No saved check at position {position}."),
        Err(DashboardError::NotLoggedIn) => {
            "You are not logged in. Run `fcm login` to manage your saved URL checks.".to_string()
        }
        Err(e) => return Err(e.into()),
    };
    Ok(message)
}
