//! View-layer model of the guestbook section.
//!
//! The feed layers an optimistic update on top of [`GuestbookStore`](super::GuestbookStore):
//! a submission shows up immediately as a provisional entry, and the store's answer
//! later replaces it. Entries from both sources are merged by id. Results that
//! arrive after the section was unmounted, or for a superseded load, are ignored.

use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{GuestbookEntry, LoadingState};

/// Signature of an entry the store has not confirmed yet.
pub const PROVISIONAL_SIGNATURE: &str = "#ffffff";

/// Identifies one load so stale completions can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// A submission shown optimistically and awaiting the store.
///
/// It is matched back by `key`, a per-feed submission counter. The provisional
/// entry's id is only a display value and may coincide with a stored id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub key: u64,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestbookFeed {
    /// Provisional entries (newest submission first) followed by confirmed ones.
    entries: Vec<GuestbookEntry>,
    load: LoadingState,
    submission: LoadingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip)]
    confirmed: Vec<GuestbookEntry>,
    #[serde(skip)]
    pending: Vec<(u64, GuestbookEntry)>,
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    submissions: u64,
    #[serde(skip)]
    mounted: bool,
}

impl Default for GuestbookFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestbookFeed {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            load: LoadingState::Idle,
            submission: LoadingState::Idle,
            error: None,
            confirmed: Vec::new(),
            pending: Vec::new(),
            generation: 0,
            submissions: 0,
            mounted: true,
        }
    }

    pub fn entries(&self) -> &[GuestbookEntry] {
        &self.entries
    }

    pub fn load_state(&self) -> LoadingState {
        self.load
    }

    pub fn submission_state(&self) -> LoadingState {
        self.submission
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a load. Only the most recent ticket is honored.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load = LoadingState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a load result. Returns `false` when the result was ignored.
    ///
    /// Loaded entries are merged into what is already confirmed, so an entry
    /// reconciled after the store was read stays visible.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<GuestbookEntry>, AppError>,
    ) -> bool {
        if !self.mounted || ticket.0 != self.generation {
            tracing::debug!("Ignoring stale guestbook load");
            return false;
        }

        match result {
            Ok(loaded) => {
                let current = std::mem::take(&mut self.confirmed);
                self.confirmed = merge_by_id(loaded, current);
                self.load = LoadingState::Success;
                self.error = None;
                self.refresh();
            }
            Err(e) => {
                tracing::warn!("Guestbook load failed: {}", e);
                self.load = LoadingState::Error;
                self.error = Some(e.message().to_string());
            }
        }
        true
    }

    /// Validate a form submission and show it immediately.
    pub fn submit(&mut self, name: &str, message: &str) -> Result<PendingSubmission, AppError> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if message.is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }

        let now = Utc::now();
        let newest = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let display_id = u64::try_from(now.timestamp_millis())
            .unwrap_or(0)
            .max(newest + 1);

        self.submissions += 1;
        let key = self.submissions;
        self.pending.push((
            key,
            GuestbookEntry {
                id: display_id,
                name: name.to_string(),
                message: message.to_string(),
                created_at: now.to_rfc3339(),
                signature: PROVISIONAL_SIGNATURE.to_string(),
            },
        ));
        self.submission = LoadingState::Loading;
        self.refresh();

        Ok(PendingSubmission {
            key,
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    /// Replace a provisional entry with the store's result, or roll it back on failure.
    /// Returns `false` when the result was ignored.
    pub fn reconcile(
        &mut self,
        pending: &PendingSubmission,
        result: Result<GuestbookEntry, AppError>,
    ) -> bool {
        if !self.mounted {
            tracing::debug!("Ignoring guestbook submission result after unmount");
            return false;
        }

        self.pending.retain(|(key, _)| *key != pending.key);

        match result {
            Ok(entry) => {
                let current = std::mem::take(&mut self.confirmed);
                self.confirmed = merge_by_id(vec![entry], current);
                if self.pending.is_empty() {
                    self.submission = LoadingState::Success;
                }
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Guestbook submission failed: {}", e);
                self.submission = LoadingState::Error;
                self.error = Some(e.message().to_string());
            }
        }
        self.refresh();
        true
    }

    /// Return the submission indicator to idle once `pending`'s status has shown.
    /// A later submission keeps its own status.
    pub fn clear_submission(&mut self, pending: &PendingSubmission) {
        if pending.key == self.submissions && self.pending.is_empty() {
            self.submission = LoadingState::Idle;
        }
    }

    /// Stop accepting results. The section is gone.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    fn refresh(&mut self) {
        self.entries = self
            .pending
            .iter()
            .rev()
            .map(|(_, entry)| entry.clone())
            .chain(self.confirmed.iter().cloned())
            .collect();
    }
}

/// Merge two entry lists, keeping the first occurrence of each id, newest first.
pub fn merge_by_id(first: Vec<GuestbookEntry>, second: Vec<GuestbookEntry>) -> Vec<GuestbookEntry> {
    let mut merged: Vec<GuestbookEntry> = Vec::with_capacity(first.len() + second.len());
    for entry in first.into_iter().chain(second) {
        if !merged.iter().any(|e| e.id == entry.id) {
            merged.push(entry);
        }
    }
    merged.sort_by(|a, b| b.id.cmp(&a.id));
    merged
}
