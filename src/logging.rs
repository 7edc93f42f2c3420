//! Log sink setup
//!
//! The terminal is owned by the TUI, so events go to a file only.

use crate::{PlannerError, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Build the event filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber appending plain-text events to `path`.
///
/// Parent directories are created as needed. Fails if a global subscriber
/// is already set.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| PlannerError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_log_file_and_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tripplan.log");

        // another test binary thread may already own the global subscriber
        let _ = init_file_logging(&path);
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_parent_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let err = init_file_logging(&blocker.join("tripplan.log")).unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
