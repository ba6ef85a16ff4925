use std::collections::HashMap;

use backend_domain::{PageRecord, PageSummary};
use tokio::sync::RwLock;

/// Per-page configuration records keyed by exact, case-sensitive page id.
#[derive(Default)]
pub struct PageRegistry {
    pages: RwLock<HashMap<String, PageRecord>>,
}

impl PageRegistry {
    /// Every known page once, in no particular order.
    pub async fn list(&self) -> Vec<PageSummary> {
        let pages = self.pages.read().await;
        pages.values().map(PageSummary::from).collect()
    }

    pub async fn get(&self, page_id: &str) -> Option<PageRecord> {
        let pages = self.pages.read().await;
        pages.get(page_id).cloned()
    }

    /// Replaces the record for `page_id` wholesale and returns what was
    /// stored. Empty message, color and theme take their defaults, and the
    /// stored `page_id` is always the key.
    pub async fn upsert(&self, page_id: &str, record: PageRecord) -> PageRecord {
        let stored = PageRecord {
            page_id: page_id.to_string(),
            display_name: record.display_name,
            config: record.config.with_display_defaults(),
        };
        let mut pages = self.pages.write().await;
        pages.insert(page_id.to_string(), stored.clone());
        stored
    }

    pub async fn page_count(&self) -> usize {
        self.pages.read().await.len()
    }
}
