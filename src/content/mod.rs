//! Static site content and the markdown-like body parser.

mod blocks;
mod catalog;

pub use blocks::*;
pub use catalog::*;
