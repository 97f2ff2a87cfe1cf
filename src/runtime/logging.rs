use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn log_event(level: LogLevel, message: &str, context: Option<serde_json::Value>) {
    let context = context.map(|value| value.to_string()).unwrap_or_default();
    match level {
        LogLevel::Debug => tracing::debug!(context = %context, "[EStat] {}", message),
        LogLevel::Info => tracing::info!(context = %context, "[EStat] {}", message),
        LogLevel::Warn => tracing::warn!(context = %context, "[EStat] {}", message),
        LogLevel::Error => tracing::error!(context = %context, "[EStat] {}", message),
    }
}
