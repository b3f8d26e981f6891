#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_at_least, validate_path, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_UPPER_BOUND: u64 = 9_999_999;
pub const DEFAULT_MILESTONE_INTERVAL: u64 = 100_000;

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub upper_bound: Option<u64>,
    pub milestone_interval: Option<u64>,
    pub output_path: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub monitor: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationSettings {
    pub upper_bound: u64,
    pub milestone_interval: u64,
    /// `None` writes to stdout.
    pub output_path: Option<String>,
    pub output_format: OutputFormat,
    pub monitor: bool,
}

impl Default for EnumerationSettings {
    fn default() -> Self {
        Self {
            upper_bound: DEFAULT_UPPER_BOUND,
            milestone_interval: DEFAULT_MILESTONE_INTERVAL,
            output_path: None,
            output_format: OutputFormat::Text,
            monitor: false,
        }
    }
}

impl EnumerationSettings {
    pub fn new(upper_bound: u64, milestone_interval: u64) -> Self {
        Self {
            upper_bound,
            milestone_interval,
            ..Self::default()
        }
    }

    /// Command line beats the config file, which beats the defaults.
    pub fn resolve(overrides: &SettingsOverrides, file: Option<&TomlConfig>) -> Result<Self> {
        let defaults = Self::default();

        let file_format = match file {
            Some(f) => f.output_format()?,
            None => None,
        };

        Ok(Self {
            upper_bound: overrides
                .upper_bound
                .or_else(|| file.and_then(TomlConfig::upper_bound))
                .unwrap_or(defaults.upper_bound),
            milestone_interval: overrides
                .milestone_interval
                .or_else(|| file.and_then(TomlConfig::milestone_interval))
                .unwrap_or(defaults.milestone_interval),
            output_path: overrides
                .output_path
                .clone()
                .or_else(|| file.and_then(|f| f.output_path().map(str::to_string))),
            output_format: overrides
                .output_format
                .or(file_format)
                .unwrap_or(defaults.output_format),
            monitor: overrides
                .monitor
                .unwrap_or_else(|| file.map(TomlConfig::monitoring_enabled).unwrap_or(false)),
        })
    }
}

impl ConfigProvider for EnumerationSettings {
    fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    fn milestone_interval(&self) -> u64 {
        self.milestone_interval
    }
}

impl Validate for EnumerationSettings {
    fn validate(&self) -> Result<()> {
        validate_at_least("upper_bound", self.upper_bound, 3)?;
        validate_at_least("milestone_interval", self.milestone_interval, 1)?;
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }
        Ok(())
    }
}
