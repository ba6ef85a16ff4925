pub mod config_handlers;
pub mod ops_handlers;
pub mod page_handlers;
pub mod stream_handlers;

pub use config_handlers::*;
pub use ops_handlers::*;
pub use page_handlers::*;
pub use stream_handlers::*;

use serde::Serialize;

/// Acknowledgement body returned by every mutation endpoint.
#[derive(Debug, Serialize)]
pub struct StatusAck {
    pub status: &'static str,
    #[serde(rename = "pageId", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl StatusAck {
    pub fn new(status: &'static str) -> Self {
        Self {
            status,
            page_id: None,
        }
    }
}
