//! Domain entities.

mod link;
mod post;

pub use link::FriendLink;
pub use post::{EXCERPT_LEN, Post, PostDraft, PostStatus};
