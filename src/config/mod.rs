//! Configuration management module
//!
//! Handles loading, saving, and validation of the planner configuration
//! and user preferences.

use crate::models::TravelMood;
use crate::{PlannerError, Result, APP_NAME, CONFIG_FILE, DEFAULT_ANALYSIS_DELAY_MS, LOG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// How long the simulated analysis screen stays up, e.g. "3s"
    #[serde(with = "humantime_serde_str")]
    pub analysis_delay: Duration,
    /// UI redraw and input poll interval, e.g. "250ms"
    #[serde(with = "humantime_serde_str")]
    pub tick_rate: Duration,
    /// Start the home screen in dark mode
    pub dark_mode: bool,
    /// Destinations with this mood are listed first
    pub preferred_mood: TravelMood,
    /// Log file location; the data directory is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            tick_rate: Duration::from_millis(250),
            dark_mode: false,
            preferred_mood: TravelMood::Beach,
            log_file: None,
        }
    }
}

impl PlannerConfig {
    const MIN_ANALYSIS_DELAY: Duration = Duration::from_millis(100);
    const MAX_ANALYSIS_DELAY: Duration = Duration::from_secs(60);
    const MIN_TICK_RATE: Duration = Duration::from_millis(16);
    const MAX_TICK_RATE: Duration = Duration::from_secs(1);

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.analysis_delay < Self::MIN_ANALYSIS_DELAY
            || self.analysis_delay > Self::MAX_ANALYSIS_DELAY
        {
            return Err(PlannerError::Config(format!(
                "Analysis delay must be between {} and {}",
                humantime::format_duration(Self::MIN_ANALYSIS_DELAY),
                humantime::format_duration(Self::MAX_ANALYSIS_DELAY)
            )));
        }

        if self.tick_rate < Self::MIN_TICK_RATE || self.tick_rate > Self::MAX_TICK_RATE {
            return Err(PlannerError::Config(format!(
                "Tick rate must be between {} and {}",
                humantime::format_duration(Self::MIN_TICK_RATE),
                humantime::format_duration(Self::MAX_TICK_RATE)
            )));
        }

        if let Some(path) = &self.log_file {
            if path.as_os_str().is_empty() {
                return Err(PlannerError::Config("Log file path is empty".to_string()));
            }
        }

        Ok(())
    }

    /// Set the analysis delay
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }

    /// Set the tick rate
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set dark mode
    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    /// Set the preferred mood
    pub fn with_preferred_mood(mut self, mood: TravelMood) -> Self {
        self.preferred_mood = mood;
        self
    }

    /// Set the log file path
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, defaulting when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PlannerError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            PlannerError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            PlannerError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Write this config's Home display preferences (dark mode, mood) into
    /// the file at `path`, leaving its other settings untouched.
    ///
    /// Returns whether the file had to be written.
    pub fn save_preferences_to(&self, path: &Path) -> Result<bool> {
        let stored = Self::load_from(path)?;
        if stored.dark_mode == self.dark_mode && stored.preferred_mood == self.preferred_mood {
            return Ok(false);
        }
        stored
            .with_dark_mode(self.dark_mode)
            .with_preferred_mood(self.preferred_mood)
            .save_to(path)?;
        Ok(true)
    }

    /// Save the Home display preferences to the standard config file
    pub fn save_preferences(&self) -> Result<bool> {
        self.save_preferences_to(&Self::config_file_path()?)
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/tripplan/tripplan.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            PlannerError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Log file to write to: the configured one, else $DATA_HOME/tripplan/tripplan.log
    pub fn resolved_log_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PlannerError::Config("Unable to determine data directory".to_string()))?;
        Ok(data_dir.join(APP_NAME).join(LOG_FILE))
    }
}

/// Durations stored as humantime strings ("3s", "250ms")
mod humantime_serde_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis_delay, Duration::from_secs(3));
        assert_eq!(config.preferred_mood, TravelMood::Beach);
    }

    #[test]
    fn test_validation_bounds() {
        let too_fast = PlannerConfig::new().with_analysis_delay(Duration::from_millis(10));
        assert!(matches!(too_fast.validate(), Err(PlannerError::Config(_))));

        let too_slow = PlannerConfig::new().with_analysis_delay(Duration::from_secs(120));
        assert!(too_slow.validate().is_err());

        let bad_tick = PlannerConfig::new().with_tick_rate(Duration::from_secs(5));
        assert!(bad_tick.validate().is_err());

        let empty_log = PlannerConfig::new().with_log_file(PathBuf::new());
        assert!(empty_log.validate().is_err());
    }

    #[test]
    fn test_toml_uses_humantime_strings() {
        let config = PlannerConfig::new()
            .with_analysis_delay(Duration::from_millis(1500))
            .with_preferred_mood(TravelMood::City);
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        assert!(toml_str.contains("analysis_delay = \"1s 500ms\""));
        assert!(toml_str.contains("preferred_mood = \"city\""));

        let parsed: PlannerConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: PlannerConfig = toml::from_str("dark_mode = true\nanalysis_delay = \"2s\"\n")
            .expect("partial config should parse");
        assert!(parsed.dark_mode);
        assert_eq!(parsed.analysis_delay, Duration::from_secs(2));
        assert_eq!(parsed.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = PlannerConfig::new().with_dark_mode(true);
        config.save_to(&path).expect("save");
        let loaded = PlannerConfig::load_from(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let loaded = PlannerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, PlannerConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "analysis_delay = \"soon\"\n").unwrap();
        assert!(matches!(PlannerConfig::load_from(&path), Err(PlannerError::Config(_))));

        fs::write(&path, "analysis_delay = \"5ms\"\n").unwrap();
        assert!(PlannerConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_preferences_saved_without_touching_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tripplan.toml");
        fs::write(&path, "analysis_delay = \"1s\"\n").unwrap();

        let config = PlannerConfig::default()
            .with_dark_mode(true)
            .with_preferred_mood(TravelMood::City);
        assert!(config.save_preferences_to(&path).unwrap());

        let reloaded = PlannerConfig::load_from(&path).unwrap();
        assert!(reloaded.dark_mode);
        assert_eq!(reloaded.preferred_mood, TravelMood::City);
        assert_eq!(reloaded.analysis_delay, Duration::from_secs(1));

        // nothing left to write
        assert!(!config.save_preferences_to(&path).unwrap());
    }

    #[test]
    fn test_paths_contain_app_name() {
        let path = PlannerConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("tripplan.toml"));

        let explicit = PlannerConfig::new().with_log_file(PathBuf::from("/tmp/x.log"));
        assert_eq!(explicit.resolved_log_file().unwrap(), PathBuf::from("/tmp/x.log"));
    }
}
