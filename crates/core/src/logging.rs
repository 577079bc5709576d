//! Tracing setup for workbench processes.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging for one workbench component.
///
/// Log files roll daily under `~/.cellarium/logs` with the component name as
/// prefix (e.g. `workbench.2026-08-07`). The returned guard flushes the
/// writer on drop; hold it for the process lifetime.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cellarium/logs");
    let _ = std::fs::create_dir_all(&log_dir);

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, component));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    } else {
        registry.init();
    }

    guard
}
