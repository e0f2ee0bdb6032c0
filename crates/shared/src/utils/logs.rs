use crate::config::LogConfig;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Console output goes to stderr and honours `RUST_LOG` (silent by default
/// outside dev mode).
/// With file logging enabled, JSON lines go to a daily rolling file; keep
/// the returned guard alive until exit so buffered lines are flushed.
pub fn init_logger(config: &LogConfig, component: &str) -> Option<WorkerGuard> {
    let default_console = if config.is_dev { "debug" } else { "off" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_console));

    let console_layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_ansi(true)
        .with_filter(console_filter);

    let (file_layer, guard) = if config.enable_file {
        let file_name = format!("shopping_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info,sqlx=warn"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
