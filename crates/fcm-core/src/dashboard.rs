//! Check → result → history pipeline for one user session.
//!
//! Owns the in-memory state a front end renders: the last result and the
//! signed-in user's history. Collaborators (scoring strategy, identity
//! provider, key-value store) are injected.

use std::sync::Arc;
use thiserror::Error;

use crate::history::HistoryStore;
use crate::input::{self, InputError};
use crate::kv::{KeyValueStore, StoreError};
use crate::result::CheckResult;
use crate::scoring::ScoringStrategy;
use crate::session::{SessionError, SessionGate, UserProfile};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("please login to view your dashboard")]
    NotLoggedIn,
    #[error("could not save history: {0}")]
    Store(#[from] StoreError),
}

pub struct Dashboard<S> {
    strategy: Arc<dyn ScoringStrategy>,
    session: SessionGate<S>,
    history: HistoryStore<S>,
    last_result: Option<CheckResult>,
}

impl<S: KeyValueStore> Dashboard<S> {
    pub fn new(
        strategy: Arc<dyn ScoringStrategy>,
        session: SessionGate<S>,
        history: HistoryStore<S>,
    ) -> Self {
        Self {
            strategy,
            session,
            history,
            last_result: None,
        }
    }

    /// Pick up a saved session and load its history.
    pub fn restore(&mut self) -> Option<&UserProfile> {
        let identity = self.session.restore()?.uid.clone();
        self.history.load(&identity);
        self.session.current()
    }

    pub fn login(&mut self) -> Result<UserProfile, SessionError> {
        let profile = self.session.login()?.clone();
        self.history.load(&profile.uid);
        Ok(profile)
    }

    /// Sign out and unload history. Stored history stays for the next login.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session.logout()?;
        self.history.clear();
        Ok(())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.current()
    }

    /// Scoring strategy, for callers that run the scoring call off-thread.
    pub fn strategy(&self) -> Arc<dyn ScoringStrategy> {
        Arc::clone(&self.strategy)
    }

    /// First half of a check: the URL to score, or why not.
    pub fn gate(&self, raw: &str) -> Result<String, InputError> {
        input::validate(raw).map(str::to_string)
    }

    /// Second half of a check: show `result` and, when signed in and the check
    /// succeeded, put it at the top of the user's history.
    /// Returns whether the result was saved. The result is shown even if saving fails.
    pub fn record(&mut self, result: CheckResult) -> Result<bool, StoreError> {
        let saved = match self.session.identity() {
            Some(identity) if !result.is_error() => self
                .history
                .append(identity, result.clone())
                .map(|()| true),
            _ => Ok(false),
        };
        tracing::info!(
            url = %result.url,
            score = ?result.score,
            status = ?result.status.as_ref().map(ToString::to_string),
            saved = matches!(saved, Ok(true)),
            "check recorded"
        );
        self.last_result = Some(result);
        saved
    }

    /// Gate, score on the current thread, record.
    pub fn submit(&mut self, raw: &str) -> Result<CheckResult, DashboardError> {
        let url = self.gate(raw)?;
        let result = self.strategy.score(&url);
        self.record(result.clone())?;
        Ok(result)
    }

    pub fn last_result(&self) -> Option<&CheckResult> {
        self.last_result.as_ref()
    }

    pub fn history(&self) -> Result<&[CheckResult], DashboardError> {
        if self.session.identity().is_none() {
            return Err(DashboardError::NotLoggedIn);
        }
        Ok(self.history.entries())
    }

    /// Delete the history entry at `index` (0-based). `Ok(None)` when out of range.
    pub fn remove_history_item(
        &mut self,
        index: usize,
    ) -> Result<Option<CheckResult>, DashboardError> {
        let identity = self
            .session
            .identity()
            .ok_or(DashboardError::NotLoggedIn)?;
        Ok(self.history.remove_at(identity, index)?)
    }
}
