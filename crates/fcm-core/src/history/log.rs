//! Pure list transitions for a history log (newest first).

use crate::result::CheckResult;
use crate::session::Identity;

pub type HistoryLog = Vec<CheckResult>;

/// Store key prefix; the full key is `fcm_history_<identity>`.
pub const HISTORY_KEY_PREFIX: &str = "fcm_history";

pub fn history_key(identity: &Identity) -> String {
    format!("{}_{}", HISTORY_KEY_PREFIX, identity)
}

/// New log with `entry` first, truncated to `cap` entries when bounded.
pub fn prepend(old: &[CheckResult], entry: CheckResult, cap: Option<usize>) -> HistoryLog {
    let keep = cap.map_or(old.len(), |c| c.saturating_sub(1).min(old.len()));
    let mut next = Vec::with_capacity(keep + 1);
    next.push(entry);
    next.extend_from_slice(&old[..keep]);
    next
}

/// New log without the entry at `index`, plus the removed entry.
/// `None` when `index` is out of range.
pub fn remove_at(old: &[CheckResult], index: usize) -> Option<(HistoryLog, CheckResult)> {
    if index >= old.len() {
        return None;
    }
    let mut next = old.to_vec();
    let removed = next.remove(index);
    Some((next, removed))
}

/// Decode a stored log. Anything that is not a JSON array of records is an empty log.
pub fn decode(json: &str) -> HistoryLog {
    match serde_json::from_str(json) {
        Ok(log) => log,
        Err(e) => {
            tracing::warn!("discarding malformed history: {}", e);
            Vec::new()
        }
    }
}
