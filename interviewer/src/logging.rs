use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "interviewer";

/// Sends tracing output to a daily rolling file under [`LOG_DIR`] so log lines
/// never land in the middle of the menu. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init() -> WorkerGuard {
    std::fs::create_dir_all(LOG_DIR).ok();
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    guard
}
