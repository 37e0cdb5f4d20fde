//! Top-level view enumeration.

use serde::{Deserialize, Serialize};

/// The mutually exclusive full-page views the shell renders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    #[default]
    Home,
    BlogPost,
    AllProjects,
    AllBlogs,
}

impl ViewState {
    pub const ALL: [ViewState; 4] = [
        ViewState::Home,
        ViewState::BlogPost,
        ViewState::AllProjects,
        ViewState::AllBlogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Home => "HOME",
            ViewState::BlogPost => "BLOG_POST",
            ViewState::AllProjects => "ALL_PROJECTS",
            ViewState::AllBlogs => "ALL_BLOGS",
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for the generic view setter.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeViewRequest {
    pub view: ViewState,
}
