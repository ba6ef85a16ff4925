use serde::{Deserialize, Serialize};

pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub static_dir: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            static_dir: None,
            cors_allowed_origins: vec![ANY_ORIGIN.to_string()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl RuntimeConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin == ANY_ORIGIN)
    }

    /// Origin check shared by the CORS layer and the streaming upgrade.
    /// Requests without an `Origin` header are same-origin or non-browser
    /// and always pass.
    pub fn is_origin_allowed(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        self.allows_any_origin()
            || self
                .cors_allowed_origins
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(origin.trim()))
    }
}
