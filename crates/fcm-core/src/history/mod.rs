//! Per-identity check history, persisted as a JSON array (newest first) under
//! `fcm_history_<identity>` and mirrored in memory while signed in.
//!
//! Every write replaces the whole stored sequence. Loading never fails: missing
//! or corrupt data is an empty history.

mod log;

pub use log::{decode, history_key, prepend, remove_at, HistoryLog, HISTORY_KEY_PREFIX};

use crate::kv::{KeyValueStore, StoreError};
use crate::result::CheckResult;
use crate::session::Identity;

/// History currently shown for one identity.
#[derive(Debug)]
struct LoadedLog {
    identity: Identity,
    entries: HistoryLog,
}

pub struct HistoryStore<S> {
    store: S,
    cap: Option<usize>,
    view: Option<LoadedLog>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// `cap` bounds stored entries per identity; `None` keeps everything.
    pub fn new(store: S, cap: Option<usize>) -> Self {
        Self {
            store,
            cap,
            view: None,
        }
    }

    /// Persisted log for `identity`, without touching the in-memory view.
    pub fn read(&self, identity: &Identity) -> HistoryLog {
        match self.store.get(&history_key(identity)) {
            Ok(Some(json)) => decode(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(identity = %identity, "could not read history: {}", e);
                Vec::new()
            }
        }
    }

    /// Read the persisted log and make it the in-memory view.
    pub fn load(&mut self, identity: &Identity) -> &[CheckResult] {
        let entries = self.read(identity);
        tracing::debug!(identity = %identity, entries = entries.len(), "history loaded");
        &self
            .view
            .insert(LoadedLog {
                identity: identity.clone(),
                entries,
            })
            .entries
    }

    fn write(&mut self, identity: &Identity, entries: HistoryLog) -> Result<(), StoreError> {
        let key = history_key(identity);
        let json = serde_json::to_string(&entries).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.store.set(&key, &json)?;
        self.view = Some(LoadedLog {
            identity: identity.clone(),
            entries,
        });
        Ok(())
    }

    /// Put `entry` first and persist the whole log.
    pub fn append(&mut self, identity: &Identity, entry: CheckResult) -> Result<(), StoreError> {
        let next = prepend(&self.read(identity), entry, self.cap);
        self.write(identity, next)
    }

    /// Delete the entry at `index`. Out of range is a no-op returning `None`.
    pub fn remove_at(
        &mut self,
        identity: &Identity,
        index: usize,
    ) -> Result<Option<CheckResult>, StoreError> {
        let Some((next, removed)) = remove_at(&self.read(identity), index) else {
            tracing::debug!(identity = %identity, index, "remove_at out of range");
            return Ok(None);
        };
        self.write(identity, next)?;
        Ok(Some(removed))
    }

    /// Drop the in-memory view (logout). Persisted data is untouched.
    pub fn clear(&mut self) {
        self.view = None;
    }

    /// Entries in the in-memory view; empty when nothing is loaded.
    pub fn entries(&self) -> &[CheckResult] {
        self.view
            .as_ref()
            .map(|v| v.entries.as_slice())
            .unwrap_or_default()
    }

    /// Identity whose history is loaded, if any.
    pub fn loaded_for(&self) -> Option<&Identity> {
        self.view.as_ref().map(|v| &v.identity)
    }
}
