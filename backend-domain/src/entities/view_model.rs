use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const CHAT_HEADER_COMPONENT: &str = "chat-header";
pub const CHAT_MESSAGES_COMPONENT: &str = "chat-messages";

/// Render-ready payload pushed to streaming clients. Built fresh per send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub layout: String,
    pub components: Vec<Component>,
    pub theme: ThemeConfig,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub content: String,
    pub properties: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(rename = "primaryColor")]
    pub primary_color: String,
    #[serde(rename = "secondaryColor")]
    pub secondary_color: String,
    #[serde(rename = "fontSize")]
    pub font_size: String,
}
