use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::error::RepoError;
use scribe_core::ports::TagStore;

/// In-memory tag storage: post id to label set. Labels are trimmed and
/// deduplicated on the way in.
pub struct MemoryTagStore {
    rows: RwLock<HashMap<i64, BTreeSet<String>>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryTagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagStore for MemoryTagStore {
    async fn tags_for(&self, post_id: i64) -> Result<Vec<String>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&post_id)
            .map(|labels| labels.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn posts_tagged(&self, label: &str) -> Result<Vec<i64>, RepoError> {
        let rows = self.rows.read().await;
        let mut ids: Vec<i64> = rows
            .iter()
            .filter(|(_, labels)| labels.contains(label))
            .map(|(post_id, _)| *post_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn set_tags(&self, post_id: i64, labels: &[String]) -> Result<(), RepoError> {
        let normalized: BTreeSet<String> = labels
            .iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();

        let mut rows = self.rows.write().await;
        if normalized.is_empty() {
            rows.remove(&post_id);
        } else {
            rows.insert(post_id, normalized);
        }
        Ok(())
    }
}
