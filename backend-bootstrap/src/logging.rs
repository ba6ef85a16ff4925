use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use backend_infrastructure::AppConfig;

const LOG_FILE_PREFIX: &str = "chatcast.log";

/// Installs the global subscriber. When a log directory is configured the
/// returned guard must be held until exit so buffered lines are flushed.
pub fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let Some(log_dir) = config.log_dir.as_deref() else {
        if config.json_logs {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter())
                .init();
        } else {
            tracing_subscriber::fmt().with_env_filter(env_filter()).init();
        }
        return None;
    };

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(writer)
            .init();
    }
    Some(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
