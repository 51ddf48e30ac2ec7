//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,pa_core=debug,page_analyzer=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file: `~/.local/state/page-analyzer/page-analyzer.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("page-analyzer")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("page-analyzer")
        .join("page-analyzer.log"))
}

/// Plain-text subscriber writing every event to `file`.
fn file_subscriber(file: fs::File) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish()
}

/// Log to `log_file_path()`, appending. Errors if the file cannot be opened
/// or a subscriber is already set; callers then use [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let log_file_path = log_file_path()?;
    if let Some(log_dir) = log_file_path.parent() {
        fs::create_dir_all(log_dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    file_subscriber(file)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))?;

    tracing::info!("page-analyzer logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Log to stderr. No-op if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_under_state_dir() {
        let path = log_file_path().unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("page-analyzer.log")
        );
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn file_subscriber_appends_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        tracing::subscriber::with_default(file_subscriber(file), || {
            tracing::info!("first line");
            tracing::warn!("second line");
        });

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("first line"), "{written}");
        assert!(written.contains("second line"), "{written}");
        assert!(!written.contains('\x1b'), "ANSI escapes in log file");
    }
}
