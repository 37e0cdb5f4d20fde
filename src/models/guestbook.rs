//! Guestbook entry model.

use serde::{Deserialize, Serialize};

/// A single guestbook submission. Immutable once created.
///
/// Serialized field names are the durable blob format, so they stay snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuestbookEntry {
    /// Unique, monotonically increasing; newer entries carry larger ids
    pub id: u64,
    pub name: String,
    pub message: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// Decorative color token
    pub signature: String,
}

/// Request body for signing the guestbook.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

/// Progress of an asynchronous load or submission as seen by a view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
