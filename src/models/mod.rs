//! Data models for the portfolio shell.
//!
//! Field names serialize in the same casing the presentation layer already consumes.

mod guestbook;
mod post;
mod project;
mod view;

pub use guestbook::*;
pub use post::*;
pub use project::*;
pub use view::*;
