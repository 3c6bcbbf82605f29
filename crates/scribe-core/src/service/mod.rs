//! Services - the post lifecycle, query and publication pipeline.

mod author;
mod notifier;
mod posts;
mod queries;
mod types;

pub use author::AuthorResolver;
pub use notifier::PublishNotifier;
pub use posts::{NewPost, PostPatch, PostService};
pub use queries::{ListRequest, PostQueries};
pub use types::{DEFAULT_TYPE_NAME, TypeRegistry};
