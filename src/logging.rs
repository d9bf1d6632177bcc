//! Structured logging for lectern using the tracing crate.
//!
//! Writes to daily-rotated files under the XDG state directory so log output
//! never interleaves with command output on stdout. The log level is
//! controlled through RUST_LOG (default "info").

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;

/// Keeps the non-blocking appender alive for the program lifetime.
static APPENDER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Rotated log files kept on disk.
const LOG_RETENTION: usize = 7;

/// Initializes file-based logging.
///
/// # Errors
/// - If the log directory cannot be determined or created
/// - If logging was already initialized
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = log_dir()?;
    prune_rotated_logs(&log_dir);

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&log_dir, "lectern.log"));
    APPENDER_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Logging already initialized"))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false),
        )
        .init();

    tracing::debug!("Logging initialized in {}", log_dir.display());
    Ok(())
}

/// Log directory per the XDG Base Directory Specification.
fn log_dir() -> anyhow::Result<PathBuf> {
    let dir = match std::env::var_os("XDG_STATE_HOME") {
        Some(state) => PathBuf::from(state).join("lectern"),
        None => dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            .join(".local/state/lectern"),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Deletes rotated log files beyond the retention window. Failures here never
/// abort startup.
fn prune_rotated_logs(log_dir: &Path) {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    let mut rotated: Vec<(PathBuf, std::time::SystemTime)> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let name = path.file_name()?.to_str()?;
            if !name.starts_with("lectern.log.") {
                return None;
            }
            let modified = fs::metadata(&path).ok()?.modified().ok()?;
            Some((path, modified))
        })
        .collect();

    rotated.sort_by(|a, b| b.1.cmp(&a.1));
    for (path, _) in rotated.into_iter().skip(LOG_RETENTION) {
        if let Err(e) = fs::remove_file(&path) {
            eprintln!("Warning: failed to remove old log {}: {e}", path.display());
        }
    }
}
