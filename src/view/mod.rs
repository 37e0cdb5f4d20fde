//! Client-side view switching without a router.
//!
//! [`ViewController`] is the single source of truth for which full-page view is
//! showing and which post, if any, is open. Everything else the shell renders is a
//! function of this state.

use serde::Serialize;

use crate::content::{parse_blocks, Block};
use crate::models::{BlogPost, ViewState};

/// Current view plus the selected post.
///
/// `view == ViewState::BlogPost` holds exactly when `selected_post` is `Some`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewController {
    view: ViewState,
    selected_post: Option<BlogPost>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn selected_post(&self) -> Option<&BlogPost> {
        self.selected_post.as_ref()
    }

    pub fn go_home(&mut self) {
        self.view = ViewState::Home;
        self.selected_post = None;
    }

    /// Show a single post. Resetting the scroll position is up to the caller.
    pub fn open_post(&mut self, post: BlogPost) {
        tracing::debug!(post_id = %post.id, "opening post");
        self.selected_post = Some(post);
        self.view = ViewState::BlogPost;
    }

    pub fn view_all_projects(&mut self) {
        self.leave_to(ViewState::AllProjects);
    }

    pub fn view_all_blogs(&mut self) {
        self.leave_to(ViewState::AllBlogs);
    }

    /// Generic setter used by the command palette.
    ///
    /// `BLOG_POST` can only be entered through [`open_post`](Self::open_post); asking
    /// for it here without a selected post leaves the state unchanged and returns
    /// `false`.
    pub fn change_view(&mut self, view: ViewState) -> bool {
        tracing::debug!(%view, "changing view");
        match view {
            ViewState::Home => self.go_home(),
            ViewState::BlogPost => {
                if self.selected_post.is_none() {
                    tracing::warn!("Ignoring switch to BLOG_POST with no post selected");
                    return false;
                }
                self.view = ViewState::BlogPost;
            }
            other => self.leave_to(other),
        }
        true
    }

    /// What the shell should render for the current state.
    pub fn screen(&self) -> Screen<'_> {
        match self.view {
            ViewState::Home => Screen::Home,
            ViewState::BlogPost => Screen::BlogPost(PostPage::from_post(self.selected_post.as_ref())),
            ViewState::AllProjects => Screen::AllProjects,
            ViewState::AllBlogs => Screen::AllBlogs,
        }
    }

    fn leave_to(&mut self, view: ViewState) {
        self.view = view;
        self.selected_post = None;
    }
}

/// Full-page screen derived from the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "page", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen<'a> {
    Home,
    BlogPost(PostPage<'a>),
    AllProjects,
    AllBlogs,
}

/// Body of the blog post screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PostPage<'a> {
    Article { post: &'a BlogPost, blocks: Vec<Block> },
    /// Rendered when the screen is reached without a post
    Placeholder,
}

impl<'a> PostPage<'a> {
    pub fn from_post(post: Option<&'a BlogPost>) -> Self {
        match post {
            Some(post) => PostPage::Article {
                post,
                blocks: parse_blocks(&post.content),
            },
            None => PostPage::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Catalog;

    fn post(id: &str) -> BlogPost {
        Catalog::builtin()
            .post(id)
            .cloned()
            .expect("builtin post")
    }

    fn assert_invariant(vc: &ViewController) {
        assert_eq!(
            vc.view() == ViewState::BlogPost,
            vc.selected_post().is_some(),
            "view {} with post {:?}",
            vc.view(),
            vc.selected_post().map(|p| &p.id)
        );
    }

    /// Every operation the shell can issue, applied to a controller.
    fn operations() -> Vec<Box<dyn Fn(&mut ViewController)>> {
        let mut ops: Vec<Box<dyn Fn(&mut ViewController)>> = vec![
            Box::new(|vc: &mut ViewController| vc.go_home()),
            Box::new(|vc: &mut ViewController| vc.open_post(post("1"))),
            Box::new(|vc: &mut ViewController| vc.open_post(post("4"))),
            Box::new(|vc: &mut ViewController| vc.view_all_projects()),
            Box::new(|vc: &mut ViewController| vc.view_all_blogs()),
        ];
        for view in ViewState::ALL {
            ops.push(Box::new(move |vc: &mut ViewController| {
                vc.change_view(view);
            }));
        }
        ops
    }

    #[test]
    fn test_initial_state() {
        let vc = ViewController::new();
        assert_eq!(vc.view(), ViewState::Home);
        assert!(vc.selected_post().is_none());
        assert_eq!(vc.screen(), Screen::Home);
    }

    #[test]
    fn test_invariant_holds_for_all_two_step_sequences() {
        let ops = operations();
        for first in &ops {
            for second in &ops {
                let mut vc = ViewController::new();
                first(&mut vc);
                assert_invariant(&vc);
                second(&mut vc);
                assert_invariant(&vc);
            }
        }
    }

    #[test]
    fn test_go_home_from_any_state() {
        for op in operations() {
            let mut vc = ViewController::new();
            op(&mut vc);
            vc.go_home();
            assert_eq!(vc.view(), ViewState::Home);
            assert!(vc.selected_post().is_none());
            vc.go_home();
            assert_eq!(vc.view(), ViewState::Home);
        }
    }

    #[test]
    fn test_open_post_then_archive_clears_selection() {
        let mut vc = ViewController::new();
        vc.open_post(post("2"));
        assert_eq!(vc.view(), ViewState::BlogPost);
        assert_eq!(vc.selected_post().map(|p| p.id.as_str()), Some("2"));

        vc.view_all_blogs();
        assert_eq!(vc.view(), ViewState::AllBlogs);
        assert!(vc.selected_post().is_none());
    }

    #[test]
    fn test_change_view_home_clears_post() {
        let mut vc = ViewController::new();
        vc.open_post(post("1"));
        assert!(vc.change_view(ViewState::Home));
        assert_eq!(vc.view(), ViewState::Home);
        assert!(vc.selected_post().is_none());
    }

    #[test]
    fn test_change_view_never_selects_a_post() {
        for view in [ViewState::AllProjects, ViewState::AllBlogs] {
            let mut vc = ViewController::new();
            assert!(vc.change_view(view));
            assert_eq!(vc.view(), view);
            assert!(vc.selected_post().is_none());
        }
    }

    #[test]
    fn test_change_view_to_post_without_selection_is_refused() {
        let mut vc = ViewController::new();
        vc.view_all_projects();
        assert!(!vc.change_view(ViewState::BlogPost));
        assert_eq!(vc.view(), ViewState::AllProjects);
    }

    #[test]
    fn test_change_view_to_post_with_selection_keeps_it() {
        let mut vc = ViewController::new();
        vc.open_post(post("4"));
        assert!(vc.change_view(ViewState::BlogPost));
        assert_eq!(vc.selected_post().map(|p| p.id.as_str()), Some("4"));
    }

    #[test]
    fn test_post_screen_parses_body() {
        let mut vc = ViewController::new();
        vc.open_post(post("1"));
        match vc.screen() {
            Screen::BlogPost(PostPage::Article { post, blocks }) => {
                assert_eq!(post.id, "1");
                assert!(!blocks.is_empty());
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_missing_post_renders_placeholder() {
        assert_eq!(PostPage::from_post(None), PostPage::Placeholder);
    }

    #[test]
    fn test_state_wire_shape() {
        let mut vc = ViewController::new();
        let json = serde_json::to_value(&vc).unwrap();
        assert_eq!(json["view"], "HOME");
        assert!(json["selectedPost"].is_null());

        vc.open_post(post("2"));
        let json = serde_json::to_value(&vc).unwrap();
        assert_eq!(json["view"], "BLOG_POST");
        assert_eq!(json["selectedPost"]["readTime"], "11 min read");
    }

    #[test]
    fn test_screen_wire_shape() {
        let json = serde_json::to_value(ViewController::new().screen()).unwrap();
        assert_eq!(json["screen"], "HOME");

        let mut vc = ViewController::new();
        vc.open_post(post("1"));
        let json = serde_json::to_value(vc.screen()).unwrap();
        assert_eq!(json["screen"], "BLOG_POST");
        assert_eq!(json["page"]["kind"], "article");
        assert_eq!(json["page"]["post"]["id"], "1");
        assert!(json["page"]["blocks"].as_array().is_some_and(|b| !b.is_empty()));

        let json = serde_json::to_value(PostPage::Placeholder).unwrap();
        assert_eq!(json["kind"], "placeholder");
    }
}
