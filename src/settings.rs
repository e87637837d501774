//! # Settings Module
//!
//! ## Purpose
//! Persistent configuration of the ChemSolver binary: how much to log, where to
//! log, and how solutions are printed. The solving engine itself takes no
//! configuration.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "log_level": "info",
//!   "log_file": null,
//!   "output_format": "text",
//!   "show_tokens": false
//! }
//! ```
//!
//! A missing file means defaults. A file that exists but cannot be parsed is an error,
//! so that a typo is reported instead of silently ignored.
//!
//! ## Usage Pattern
//! ```rust
//! use ChemSolver::settings::{OutputFormat, Settings};
//!
//! let settings = Settings::load("no_such_config.json").unwrap();
//! assert_eq!(settings.output_format, OutputFormat::Text);
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "chem_solver_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unknown log level '{0}', expected off, error, warn, info, debug or trace")]
    LogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Binary configuration stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// off, error, warn, info, debug or trace
    pub log_level: String,
    /// when set, log records are also written to this file
    pub log_file: Option<String>,
    pub output_format: OutputFormat,
    /// print extracted numbers and formulas next to the solution
    pub show_tokens: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            output_format: OutputFormat::Text,
            show_tokens: false,
        }
    }
}

impl Settings {
    /// Reads the settings file, defaults if it does not exist
    pub fn load(config_file: &str) -> Result<Self, SettingsError> {
        if !Path::new(config_file).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(config_file)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, config_file: &str) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        LevelFilter::from_str(&self.log_level)
            .map(|_| ())
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), SettingsError> {
        LevelFilter::from_str(level).map_err(|_| SettingsError::LogLevel(level.to_string()))?;
        self.log_level = level.to_lowercase();
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load("definitely_missing_chem_solver_config.json").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let mut settings = Settings::default();
        settings.set_log_level("debug").unwrap();
        settings.log_file = Some("solver.log".to_string());
        settings.output_format = OutputFormat::Json;
        settings.show_tokens = true;
        settings.save(path).unwrap();

        let loaded = Settings::load(path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"output_format": "json"}"#).unwrap();
        let settings = Settings::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.log_level, "info");
        assert!(!settings.show_tokens);
    }

    #[test]
    fn test_invalid_files_are_errors() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Settings::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SettingsError::Serde(_)));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"log_level": "loud"}"#).unwrap();
        let err = Settings::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SettingsError::LogLevel(ref level) if level == "loud"));
    }

    #[test]
    fn test_set_log_level_rejects_unknown() {
        let mut settings = Settings::default();
        assert!(settings.set_log_level("verbose").is_err());
        assert_eq!(settings.log_level, "info");
        settings.set_log_level("WARN").unwrap();
        assert_eq!(settings.log_level, "warn");
        settings.reset_to_defaults();
        assert_eq!(settings, Settings::default());
    }
}
