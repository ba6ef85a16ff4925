use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use backend_domain::{RuntimeConfig, ANY_ORIGIN};

pub const CONFIG_PATH_ENV: &str = "CHATCAST_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
    pub json_logs: bool,
    /// File the values came from; `None` when defaults were used.
    #[serde(skip)]
    pub loaded_from: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            static_dir: Some("frontend/dist".to_string()),
            cors_allowed_origins: vec![ANY_ORIGIN.to_string()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
            log_dir: None,
            json_logs: false,
            loaded_from: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config: AppConfig = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config: AppConfig = toml::from_str(&content)?;
            config.loaded_from = Some(path.clone());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(static_dir) = &self.static_dir {
            if static_dir.trim().is_empty() {
                self.static_dir = None;
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.cors_allowed_origins =
            normalize_origin_list(std::mem::take(&mut self.cors_allowed_origins));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.static_dir = self.static_dir.as_deref().map(|dir| resolve_path(base, dir));
        self.log_dir = self.log_dir.as_deref().map(|dir| resolve_path(base, dir));
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.cors_allowed_origins.is_empty() {
            return Err(anyhow!(
                "cors_allowed_origins must not be empty, use \"*\" to allow every origin"
            ));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            static_dir: self.static_dir.clone(),
            cors_allowed_origins: self.cors_allowed_origins.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CHATCAST_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("CHATCAST_STATIC_DIR") {
            self.static_dir = Some(value);
        }
        if let Ok(value) = env::var("CHATCAST_CORS_ALLOWED_ORIGINS") {
            self.cors_allowed_origins = parse_env_list(&value);
        }
        if let Ok(value) = env::var("CHATCAST_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("CHATCAST_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("CHATCAST_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("CHATCAST_JSON_LOGS") {
            self.json_logs = value.parse().unwrap_or(self.json_logs);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_origin_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().trim_end_matches('/').to_string())
        .filter(|item| !item.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}
