use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISPLAY_MESSAGE: &str = "Welcome to Chat";
pub const DEFAULT_COLOR: &str = "#ffffff";
pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_PARTNER_NAME: &str = "Chat Partner";
pub const DEFAULT_PARTNER_STATUS: &str = "Offline";

/// Chat configuration record, used both as the process-wide global record
/// and as the per-page record embedded in [`crate::PageRecord`].
///
/// Every field is optional on the wire; absent fields decode to empty values,
/// which the merge and upsert paths treat as "not provided".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SharedConfig {
    #[serde(rename = "message")]
    pub display_message: String,
    #[serde(rename = "color")]
    pub current_color: String,
    pub theme: String,
    #[serde(rename = "chatPartner")]
    pub chat_partner: ChatUser,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatUser {
    pub name: String,
    pub status: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

impl SharedConfig {
    /// The fixed record installed at startup and by a reset.
    pub fn defaults() -> Self {
        Self {
            display_message: DEFAULT_DISPLAY_MESSAGE.to_string(),
            current_color: DEFAULT_COLOR.to_string(),
            theme: DEFAULT_THEME.to_string(),
            chat_partner: ChatUser {
                name: DEFAULT_PARTNER_NAME.to_string(),
                status: DEFAULT_PARTNER_STATUS.to_string(),
                avatar: String::new(),
            },
            messages: Vec::new(),
        }
    }

    /// Applies a partial update in place.
    ///
    /// Scalar fields are overwritten only when the update carries a non-empty
    /// value. The chat partner is replaced as a whole when the update names
    /// one, and the message list is replaced as a whole when non-empty.
    pub fn merge(&mut self, update: SharedConfig) {
        if !update.display_message.is_empty() {
            self.display_message = update.display_message;
        }
        if !update.current_color.is_empty() {
            self.current_color = update.current_color;
        }
        if !update.theme.is_empty() {
            self.theme = update.theme;
        }
        if !update.chat_partner.name.is_empty() {
            self.chat_partner = update.chat_partner;
        }
        if !update.messages.is_empty() {
            self.messages = update.messages;
        }
    }

    /// Substitutes the defaults for an empty message, color or theme.
    /// Partner and messages are left exactly as given.
    pub fn with_display_defaults(mut self) -> Self {
        if self.display_message.is_empty() {
            self.display_message = DEFAULT_DISPLAY_MESSAGE.to_string();
        }
        if self.current_color.is_empty() {
            self.current_color = DEFAULT_COLOR.to_string();
        }
        if self.theme.is_empty() {
            self.theme = DEFAULT_THEME.to_string();
        }
        self
    }
}
