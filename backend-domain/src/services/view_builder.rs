use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use tracing::warn;

use crate::entities::{
    ChatUser, Component, Message, SharedConfig, ThemeConfig, ViewModel, CHAT_HEADER_COMPONENT,
    CHAT_MESSAGES_COMPONENT,
};

pub const SECONDARY_COLOR: &str = "#000000";
pub const FONT_SIZE: &str = "16px";

const HEADER_COMPONENT_ID: &str = "chat-partner-info";
const MESSAGES_COMPONENT_ID: &str = "message-list";

/// Builds the wire view for a configuration record.
///
/// Always yields the header component followed by the message list
/// component. The message list is carried as a JSON string property; if it
/// cannot be encoded the property degrades to `[]`.
pub fn build_view(
    message: &str,
    color: &str,
    theme: &str,
    chat_partner: &ChatUser,
    messages: &[Message],
) -> ViewModel {
    let header = Component {
        kind: CHAT_HEADER_COMPONENT.to_string(),
        id: HEADER_COMPONENT_ID.to_string(),
        content: message.to_string(),
        properties: HashMap::from([
            ("userName".to_string(), chat_partner.name.clone()),
            ("userStatus".to_string(), chat_partner.status.clone()),
        ]),
    };
    let message_list = Component {
        kind: CHAT_MESSAGES_COMPONENT.to_string(),
        id: MESSAGES_COMPONENT_ID.to_string(),
        content: String::new(),
        properties: HashMap::from([("messages".to_string(), encode_messages(messages))]),
    };

    ViewModel {
        layout: theme.to_string(),
        components: vec![header, message_list],
        theme: ThemeConfig {
            primary_color: color.to_string(),
            secondary_color: SECONDARY_COLOR.to_string(),
            font_size: FONT_SIZE.to_string(),
        },
        updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

pub fn build_view_for(config: &SharedConfig) -> ViewModel {
    build_view(
        &config.display_message,
        &config.current_color,
        &config.theme,
        &config.chat_partner,
        &config.messages,
    )
}

fn encode_messages(messages: &[Message]) -> String {
    match serde_json::to_string(messages) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("failed to encode message list: {}", err);
            "[]".to_string()
        }
    }
}
