//! Share endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::share::{share_or_copy, SharePayload, ShareOutcome};
use crate::AppState;

/// POST /api/posts/{id}/share - Share a post link.
///
/// The headless host has no native share dialog, so this copies the link.
pub async fn share_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ShareOutcome> {
    let post = state
        .catalog
        .post(&id)
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let payload = SharePayload {
        title: post.title.clone(),
        text: post.excerpt.clone(),
        url: format!("{}/posts/{}", state.config.site_url, post.id),
    };

    success(share_or_copy(None, &*state.clipboard, &payload).await)
}

/// GET /api/clipboard - Last copied text.
pub async fn get_clipboard(State(state): State<AppState>) -> ApiResult<Option<String>> {
    success(state.clipboard.contents().await)
}
