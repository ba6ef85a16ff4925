use backend_domain::{build_view_for, SharedConfig};

use crate::ops::GLOBAL_SCOPE;
use crate::AppState;

/// Merges a partial update into the global record and broadcasts the result.
pub async fn update_global_config(state: &AppState, update: SharedConfig) -> SharedConfig {
    let merged = state.config_store.merge_update(update).await;
    publish_global(state, &merged).await;
    merged
}

pub async fn reset_global_config(state: &AppState) -> SharedConfig {
    let config = state.config_store.reset().await;
    publish_global(state, &config).await;
    config
}

// The store guard is released before this runs.
async fn publish_global(state: &AppState, config: &SharedConfig) {
    let view = build_view_for(config);
    let outcome = state.subscription_hub.broadcast(&view, GLOBAL_SCOPE).await;
    state.metrics.record_broadcast(outcome);
}

#[cfg(test)]
mod tests {
    use backend_domain::RuntimeConfig;

    use super::*;
    use crate::test_support::RecordingSink;

    #[tokio::test]
    async fn global_update_reaches_only_unscoped_connections() {
        let state = AppState::new(RuntimeConfig::default());
        let paged = RecordingSink::default();
        let unscoped = RecordingSink::default();
        state.subscription_hub.register("team", paged.boxed()).await;
        state
            .subscription_hub
            .register(GLOBAL_SCOPE, unscoped.boxed())
            .await;

        let merged = update_global_config(
            &state,
            SharedConfig {
                display_message: "Maintenance at noon".to_string(),
                ..SharedConfig::default()
            },
        )
        .await;
        assert_eq!(merged.display_message, "Maintenance at noon");
        assert_eq!(merged.current_color, "#ffffff");

        assert!(paged.frames().is_empty());
        let views = unscoped.views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].components[0].content, "Maintenance at noon");
    }

    #[tokio::test]
    async fn reset_returns_defaults_and_broadcasts() {
        let state = AppState::new(RuntimeConfig::default());
        let unscoped = RecordingSink::default();
        state
            .subscription_hub
            .register(GLOBAL_SCOPE, unscoped.boxed())
            .await;
        update_global_config(
            &state,
            SharedConfig {
                theme: "dark".to_string(),
                ..SharedConfig::default()
            },
        )
        .await;

        let config = reset_global_config(&state).await;
        assert_eq!(config, SharedConfig::defaults());
        assert_eq!(state.config_store.read().await, SharedConfig::defaults());

        let views = unscoped.views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].layout, "light");
    }
}
