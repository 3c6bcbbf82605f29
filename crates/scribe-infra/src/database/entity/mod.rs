//! SeaORM entities for the blog tables.

pub mod comment;
pub mod post;
pub mod post_tag;
pub mod post_type;
pub mod tag;
