use serde::{Deserialize, Serialize};

/// A named category a post belongs to, e.g. "blog" or "press".
///
/// Names are unique across all types; the set is small and closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostType {
    pub id: i64,
    pub name: String,
}
