//! File logging for the interactive picker.
//!
//! The TUI owns the terminal, so events go to a plain-text file instead of
//! stderr. Only `huepick` targets are recorded.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILE: &str = "huepick.log";
const DEFAULT_LEVEL: &str = "info";

/// Directory and file name for the appender.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file = path.file_name().unwrap_or(OsStr::new(DEFAULT_FILE));
    (dir, file)
}

/// Filter for crate events at `level`; unknown levels fall back to info.
fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("huepick={level}"))
        .unwrap_or_else(|_| EnvFilter::new(format!("huepick={DEFAULT_LEVEL}")))
}

/// Install the global subscriber writing to `log_path` (default `huepick.log`).
///
/// Hold the returned guard until exit; dropping it flushes the writer.
/// Debug builds also record span enter and close.
pub fn init_logging(log_path: Option<&Path>, level: Option<&str>) -> WorkerGuard {
    let (dir, file) = split_log_path(log_path.unwrap_or(Path::new(DEFAULT_FILE)));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    #[cfg(debug_assertions)]
    let layer = layer.with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(crate_filter(level.unwrap_or(DEFAULT_LEVEL)))
        .with(layer)
        .init();

    guard
}
