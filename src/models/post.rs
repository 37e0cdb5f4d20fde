//! Blog post model.

use serde::{Deserialize, Serialize};

/// A blog post shown in the blog section, the archive, and the post view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
    /// Markdown-like body, see [`crate::content::parse_blocks`]
    pub content: String,
}

/// Listing form of a post, without the body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

impl From<&BlogPost> for PostSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            date: post.date.clone(),
            read_time: post.read_time.clone(),
            tags: post.tags.clone(),
        }
    }
}
