//! Guestbook: a mock remote entry list over a durable blob.

mod feed;
mod store;

pub use feed::*;
pub use store::*;
