//! tripplan - terminal travel planner
//!
//! A linear TUI wizard that walks through destination choice, trip
//! options, a simulated route analysis, route comparison and a mock
//! payment, driven by a single navigation state machine.

use thiserror::Error;

pub mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod util;

/// Crate error type.
///
/// Navigation never produces errors; unmet guards are silent no-ops.
/// These variants cover the terminal, configuration and logging plumbing.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    Config(String),
    /// TUI rendering or interaction error
    #[error("TUI error: {0}")]
    Tui(String),
    /// Log sink could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Logging(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for PlannerError {
    fn from(err: toml::de::Error) -> Self {
        PlannerError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for PlannerError {
    fn from(err: toml::ser::Error) -> Self {
        PlannerError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for tripplan operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Error handling utilities
pub mod error {
    use super::PlannerError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &PlannerError) -> String {
        match error {
            PlannerError::Io(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied. Check permissions of the config and log directories."
                    .to_string()
            }
            PlannerError::Config(msg) => {
                format!("Configuration error: {}. Check {}.", msg, super::CONFIG_FILE)
            }
            PlannerError::Tui(_) => {
                "The terminal could not be driven. Make sure you are running in an interactive terminal."
                    .to_string()
            }
            PlannerError::Logging(_) => {
                "Failed to open the log file. Pass --log-file with a writable path.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

pub const APP_NAME: &str = "tripplan";
pub const CONFIG_FILE: &str = "tripplan.toml";
pub const LOG_FILE: &str = "tripplan.log";
/// Simulated analysis time before the route comparison appears
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 3000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: PlannerError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, PlannerError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_user_friendly_message() {
        let msg = error::user_friendly_message(&PlannerError::Config("bad delay".into()));
        assert!(msg.contains("bad delay"));
        assert!(msg.contains(CONFIG_FILE));

        let msg = error::user_friendly_message(&PlannerError::Logging("x".into()));
        assert!(msg.contains("--log-file"));
    }
}
