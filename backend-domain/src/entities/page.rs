use serde::{Deserialize, Serialize};

use super::shared_config::SharedConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PageRecord {
    #[serde(rename = "pageId")]
    pub page_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub config: SharedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(rename = "pageId")]
    pub page_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl From<&PageRecord> for PageSummary {
    fn from(record: &PageRecord) -> Self {
        Self {
            page_id: record.page_id.clone(),
            display_name: record.display_name.clone(),
        }
    }
}
