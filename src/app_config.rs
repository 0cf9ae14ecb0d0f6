use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::formatting::FormatOptions;

/// Library configuration module
/// This module handles loading, validating and saving the settings a
/// `Subtitle` is created with.
/// Represents the library configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level the host application should use
    #[serde(default)]
    pub log_level: LogLevel,

    /// Style applied to the whole text of every appended line
    #[serde(default)]
    pub default_format: FormatOptions,

    /// Number of nodes to reserve room for up front
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
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
    // @returns: Matching filter for the log crate
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_initial_capacity() -> usize {
    64
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()
            .context("Configuration validation failed")?;

        Ok(config)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .context("Failed to parse config JSON")?;

        config.validate()
            .context("Configuration validation failed")?;

        Ok(config)
    }

    /// Write the configuration as pretty printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(anyhow!("Initial capacity must be at least 1"));
        }

        if self.default_format.font_size == Some(0) {
            return Err(anyhow!("Default font size must be greater than 0"));
        }

        if let Some(color) = &self.default_format.color {
            if color.trim().is_empty() {
                warn!("Default color is an empty string");
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            default_format: FormatOptions::default(),
            initial_capacity: default_initial_capacity(),
        }
    }
}
