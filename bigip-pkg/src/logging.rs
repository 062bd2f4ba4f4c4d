//! Logging setup for the CLI.
//!
//! Two outputs share one `EnvFilter`:
//! - stderr, compact, so command output on stdout stays clean
//! - a log file (truncated each session) with full detail, written through a
//!   non-blocking appender
//!
//! `RUST_LOG` overrides the default level (`info`, or `debug` when verbose).

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Initialize logging.
///
/// Creates `log_dir` if needed and clears the previous `log_file`.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be prepared, or if a
/// global subscriber is already installed.
pub fn init_logging(log_dir: &Path, log_file: &str, verbose: bool) -> io::Result<LoggingGuard> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
