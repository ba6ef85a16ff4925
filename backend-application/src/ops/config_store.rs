use backend_domain::SharedConfig;
use tokio::sync::RwLock;

/// Holds the single global chat configuration.
pub struct ConfigStore {
    config: RwLock<SharedConfig>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            config: RwLock::new(SharedConfig::defaults()),
        }
    }
}

impl ConfigStore {
    pub async fn read(&self) -> SharedConfig {
        self.config.read().await.clone()
    }

    /// Merges a partial update and returns the snapshot taken under the same
    /// write guard, so the caller sees exactly what this merge produced.
    pub async fn merge_update(&self, update: SharedConfig) -> SharedConfig {
        let mut config = self.config.write().await;
        config.merge(update);
        config.clone()
    }

    pub async fn reset(&self) -> SharedConfig {
        let mut config = self.config.write().await;
        *config = SharedConfig::defaults();
        config.clone()
    }
}
