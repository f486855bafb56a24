//! Logging Infrastructure
//!
//! `tracing-subscriber` setup; stdout by default, daily rolling files when a
//! log directory is configured.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG`, when set, wins over `log_level`. A `log_dir` that does not
/// exist is ignored and logs go to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|dir| dir.exists())
        .map(|dir| tracing_appender::rolling::daily(dir, "freight-proxy"));

    match (json.unwrap_or(false), file_appender) {
        (true, Some(appender)) => subscriber.json().with_writer(appender).init(),
        (true, None) => subscriber.json().init(),
        (false, Some(appender)) => subscriber.with_writer(appender).init(),
        (false, None) => subscriber.init(),
    }
}
