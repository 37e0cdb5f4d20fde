//! Command palette endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::models::ViewState;
use crate::palette::{CommandAction, Key, PaletteSnapshot};
use crate::share::{copy_text, ShareOutcome};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: Key,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// Result of a key press.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    pub palette: PaletteSnapshot,
    /// The command that ran, if Enter picked one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<CommandAction>,
    pub view: ViewState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<ShareOutcome>,
}

/// GET /api/palette - Palette state and filtered commands.
pub async fn get_palette(State(state): State<AppState>) -> ApiResult<PaletteSnapshot> {
    success(state.palette.read().await.snapshot())
}

/// PUT /api/palette/query - Update the search text.
pub async fn set_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<PaletteSnapshot> {
    let mut palette = state.palette.write().await;
    palette.set_query(&request.query);
    success(palette.snapshot())
}

/// POST /api/palette/keys - Press a key; Enter runs the selected command.
///
/// View changes and clipboard copies happen here. Opening URLs is left to the client.
pub async fn press_key(
    State(state): State<AppState>,
    Json(request): Json<KeyRequest>,
) -> ApiResult<KeyResponse> {
    let (action, snapshot) = {
        let mut palette = state.palette.write().await;
        let action = palette.handle_key(request.key);
        (action, palette.snapshot())
    };

    let mut clipboard = None;
    match &action {
        Some(CommandAction::ChangeView { view, .. }) => {
            state.view.write().await.change_view(*view);
        }
        Some(CommandAction::CopyText { text }) => {
            clipboard = Some(copy_text(&*state.clipboard, text).await);
        }
        Some(CommandAction::OpenUrl { .. }) | None => {}
    }

    if let Some(action) = &action {
        tracing::debug!(?action, "Palette command executed");
    }

    success(KeyResponse {
        palette: snapshot,
        action,
        view: state.view.read().await.view(),
        clipboard,
    })
}
