use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// File extensions treated as scenario scripts
    #[serde(default = "default_scenario_extensions")]
    pub scenario_extensions: Vec<String>,

    /// File extensions treated as translation catalogs
    #[serde(default = "default_translation_extensions")]
    pub translation_extensions: Vec<String>,

    /// Report issues without writing fixed files back
    #[serde(default)]
    pub check_only: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: The matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_scenario_extensions() -> Vec<String> {
    vec!["ks".to_string()]
}

fn default_translation_extensions() -> Vec<String> {
    vec!["po".to_string()]
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(&path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.scenario_extensions.is_empty() && self.translation_extensions.is_empty() {
            return Err(
                AppError::Config("At least one file extension must be configured".to_string())
                    .into(),
            );
        }

        for extension in self.scenario_extensions.iter().chain(&self.translation_extensions) {
            if extension.is_empty() || extension.starts_with('.') {
                return Err(
                    AppError::Config(format!("Invalid file extension: '{}'", extension)).into()
                );
            }
        }

        if let Some(extension) = self
            .scenario_extensions
            .iter()
            .find(|e| self.translation_extensions.contains(e))
        {
            return Err(AppError::Config(format!(
                "Extension '{}' is configured as both scenario and translation",
                extension
            ))
            .into());
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            scenario_extensions: default_scenario_extensions(),
            translation_extensions: default_translation_extensions(),
            check_only: false,
            log_level: LogLevel::default(),
        }
    }
}
