//! Post and project endpoints.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::content::{parse_blocks, Block};
use crate::errors::AppError;
use crate::models::{BlogPost, PostSummary, Project};
use crate::AppState;

/// A post together with its parsed body.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: BlogPost,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    /// Only projects shown in the home gallery.
    #[serde(default)]
    pub featured: bool,
}

/// GET /api/posts - List all posts.
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<PostSummary>> {
    success(state.catalog.posts().iter().map(PostSummary::from).collect())
}

/// GET /api/posts/{id} - A single post with parsed blocks.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PostDetail> {
    let post = state
        .catalog
        .post(&id)
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    success(PostDetail {
        blocks: parse_blocks(&post.content),
        post: post.clone(),
    })
}

/// GET /api/projects - List projects.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectQuery>,
) -> ApiResult<Vec<Project>> {
    let projects = if params.featured {
        state.catalog.featured_projects().cloned().collect()
    } else {
        state.catalog.projects().to_vec()
    };
    success(projects)
}
