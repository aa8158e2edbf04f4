use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const LOG_DIR: &str = "data/logs";
const LOG_FILE_NAME: &str = "checkin.log";
const TIMESTAMP_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";

// Console gets colored output, the file gets the same lines uncolored.
// The returned guard must stay alive for the worker to flush the file.
pub fn init_default_logger() -> WorkerGuard {
    std::fs::create_dir_all(LOG_DIR).expect("Log directory to be writable");

    let file_appender = tracing_appender::rolling::never(LOG_DIR, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = fmt::layer()
        .with_ansi(true)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_owned()));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_owned()));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
