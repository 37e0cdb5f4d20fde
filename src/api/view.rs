//! View-state endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::ChangeViewRequest;
use crate::view::{Screen, ViewController};
use crate::AppState;

/// GET /api/view - Current view and selected post.
pub async fn get_view(State(state): State<AppState>) -> ApiResult<ViewController> {
    success(state.view.read().await.clone())
}

/// GET /api/view/screen - What the shell should render right now.
pub async fn get_screen(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    let view = state.view.read().await;
    let screen: Screen<'_> = view.screen();
    success(serde_json::to_value(&screen).map_err(AppError::from)?)
}

/// POST /api/view/home - Back to the home page.
pub async fn go_home(State(state): State<AppState>) -> ApiResult<ViewController> {
    let mut view = state.view.write().await;
    view.go_home();
    success(view.clone())
}

/// POST /api/view/projects - Project archive.
pub async fn view_all_projects(State(state): State<AppState>) -> ApiResult<ViewController> {
    let mut view = state.view.write().await;
    view.view_all_projects();
    success(view.clone())
}

/// POST /api/view/blogs - Blog archive.
pub async fn view_all_blogs(State(state): State<AppState>) -> ApiResult<ViewController> {
    let mut view = state.view.write().await;
    view.view_all_blogs();
    success(view.clone())
}

/// POST /api/view/posts/{id} - Open a single post.
pub async fn open_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ViewController> {
    let post = state
        .catalog
        .post(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let mut view = state.view.write().await;
    view.open_post(post);
    success(view.clone())
}

/// PUT /api/view - Generic view switch.
pub async fn change_view(
    State(state): State<AppState>,
    Json(request): Json<ChangeViewRequest>,
) -> ApiResult<ViewController> {
    let mut view = state.view.write().await;
    if !view.change_view(request.view) {
        return Err(AppError::BadRequest(
            "BLOG_POST can only be opened with a post".to_string(),
        ));
    }
    success(view.clone())
}
