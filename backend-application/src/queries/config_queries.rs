use backend_domain::SharedConfig;

use crate::AppState;

pub async fn get_global_config(state: &AppState) -> SharedConfig {
    state.config_store.read().await
}
