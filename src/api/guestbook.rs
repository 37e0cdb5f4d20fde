//! Guestbook endpoints.

use std::time::Duration;

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::guestbook::GuestbookFeed;
use crate::models::{CreateEntryRequest, GuestbookEntry};
use crate::AppState;

/// How long the feed keeps showing a finished submission's status.
const SUBMISSION_STATUS_HOLD: Duration = Duration::from_secs(2);

/// GET /api/guestbook - Load all entries.
pub async fn list_entries(State(state): State<AppState>) -> ApiResult<Vec<GuestbookEntry>> {
    let ticket = state.feed.write().await.begin_load();

    let result = state.guestbook.fetch_entries().await;
    state.feed.write().await.finish_load(ticket, result.clone());

    success(result?)
}

/// POST /api/guestbook - Sign the guestbook.
///
/// The entry is visible in the feed while the store is still working on it.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> ApiResult<GuestbookEntry> {
    let pending = state
        .feed
        .write()
        .await
        .submit(&request.name, &request.message)?;

    let result = state
        .guestbook
        .add_entry(&pending.name, &pending.message)
        .await;
    state.feed.write().await.reconcile(&pending, result.clone());

    let feed = state.feed.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SUBMISSION_STATUS_HOLD).await;
        feed.write().await.clear_submission(&pending);
    });

    success(result?)
}

/// GET /api/guestbook/feed - What the guestbook section currently shows.
pub async fn get_feed(State(state): State<AppState>) -> ApiResult<GuestbookFeed> {
    success(state.feed.read().await.clone())
}
