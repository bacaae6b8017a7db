use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking file writer alive; dropping it loses buffered lines.
pub struct LogGuard(Option<WorkerGuard>);

/// Installs the global subscriber: stdout always, plus a daily-rolling file
/// under `LOG_DIR` when `ENABLE_FILE_LOGS` is set.
pub fn init_tracing(log_level: &str) -> LogGuard {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    match file_log_dir() {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "vocab-bot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
                .init();
            LogGuard(Some(guard))
        }
        None => {
            registry.init();
            LogGuard(None)
        }
    }
}

fn file_log_dir() -> Option<String> {
    let enabled = std::env::var("ENABLE_FILE_LOGS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    if !enabled {
        return None;
    }

    let dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    if let Err(err) = std::fs::create_dir_all(Path::new(&dir)) {
        eprintln!("failed to create log directory {dir}: {err}");
        return None;
    }
    Some(dir)
}
