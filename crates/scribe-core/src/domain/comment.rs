use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reader comment on a post. Storage is a pluggable backend; this is
/// only the shape the module passes through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Fresh unsaved comment; the backend assigns the real id.
    pub fn new(post_id: i64, author_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: 0,
            post_id,
            author_name: author_name.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}
