use std::sync::Arc;

use backend_domain::RuntimeConfig;

use crate::ops::{ConfigStore, PageRegistry, SubscriptionHub};
use crate::Metrics;

/// Process-wide state handed to every handler. Each store owns its own lock;
/// no operation holds more than one of them at a time.
#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub config_store: Arc<ConfigStore>,
    pub page_registry: Arc<PageRegistry>,
    pub subscription_hub: Arc<SubscriptionHub>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            config_store: Arc::new(ConfigStore::default()),
            page_registry: Arc::new(PageRegistry::default()),
            subscription_hub: Arc::new(SubscriptionHub::default()),
            metrics: Arc::new(Metrics::default()),
        }
    }
}
