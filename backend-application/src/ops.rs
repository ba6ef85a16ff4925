pub mod config_store;
pub mod page_registry;
pub mod subscription_hub;

pub use config_store::ConfigStore;
pub use page_registry::PageRegistry;
pub use subscription_hub::{BroadcastOutcome, ConnectionId, SubscriptionHub, GLOBAL_SCOPE};
