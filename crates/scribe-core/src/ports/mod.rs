//! Ports - trait definitions for storage and collaborators.
//! These are the interfaces a host (or `scribe-infra`) must implement.

mod author;
mod broadcast;
mod comments;
mod repository;
mod tags;

pub use author::AuthorDirectory;
pub use broadcast::{Announcement, BroadcastChannel, DispatchError};
pub use comments::CommentStore;
pub use repository::{PostFilter, PostRepository, SavedPost, TypeRepository};
pub use tags::TagStore;
