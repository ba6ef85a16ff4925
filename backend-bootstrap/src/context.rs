use backend_application::AppState;
use backend_infrastructure::AppConfig;

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    /// Builds the stores and hub once for the whole process.
    pub fn new(config: &AppConfig) -> Self {
        let state = AppState::new(config.to_runtime_config());
        Self { state }
    }
}
