use crate::adapters::OutputFormat;
use crate::utils::error::{PrimeError, Result};
use crate::utils::validation::{validate_at_least, validate_one_of, validate_path, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// On-disk run configuration. Every section and key is optional; missing
/// values fall back to the command line or the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub enumeration: EnumerationSection,
    #[serde(default)]
    pub output: OutputSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumerationSection {
    pub upper_bound: Option<u64>,
    pub milestone_interval: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringSection {
    #[serde(default)]
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PrimeError::ConfigParseError {
            field: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| PrimeError::ConfigParseError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    // Unset variables are left as written so the parse error points at them.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
            })
            .into_owned()
    }

    pub fn upper_bound(&self) -> Option<u64> {
        self.enumeration.upper_bound
    }

    pub fn milestone_interval(&self) -> Option<u64> {
        self.enumeration.milestone_interval
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output.format.as_deref().map(str::parse).transpose()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(bound) = self.enumeration.upper_bound {
            validate_at_least("enumeration.upper_bound", bound, 3)?;
        }
        if let Some(interval) = self.enumeration.milestone_interval {
            validate_at_least("enumeration.milestone_interval", interval, 1)?;
        }
        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }
        if let Some(format) = &self.output.format {
            validate_one_of("output.format", &format.to_ascii_lowercase(), &OutputFormat::NAMES)?;
        }
        if let Some(level) = self.log_level() {
            validate_one_of(
                "monitoring.log_level",
                &level.to_ascii_lowercase(),
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[enumeration]
upper_bound = 1000000
milestone_interval = 5000

[output]
path = "./out/milestones.csv"
format = "csv"

[monitoring]
enabled = true
log_level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.upper_bound(), Some(1_000_000));
        assert_eq!(config.milestone_interval(), Some(5_000));
        assert_eq!(config.output_path(), Some("./out/milestones.csv"));
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Csv));
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.upper_bound(), None);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_monitoring_section_with_only_log_level() {
        let config = TomlConfig::from_toml_str("[monitoring]\nlog_level = \"debug\"\n").unwrap();
        assert!(!config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TRIAL_PRIMES_TEST_BOUND", "4242");

        let toml_content = r#"
[enumeration]
upper_bound = ${TRIAL_PRIMES_TEST_BOUND}
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.upper_bound(), Some(4242));

        std::env::remove_var("TRIAL_PRIMES_TEST_BOUND");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[output]
path = "${TRIAL_PRIMES_SURELY_UNSET_VAR}/m.txt"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), Some("${TRIAL_PRIMES_SURELY_UNSET_VAR}/m.txt"));
    }

    #[test]
    fn test_config_validation() {
        let zero_interval = TomlConfig::from_toml_str(
            "[enumeration]\nupper_bound = 100\nmilestone_interval = 0\n",
        )
        .unwrap();
        assert!(zero_interval.validate().is_err());

        let low_bound = TomlConfig::from_toml_str("[enumeration]\nupper_bound = 2\n").unwrap();
        assert!(low_bound.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());
        assert!(bad_format.output_format().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[enumeration]\nupperbound = 10\n").unwrap_err();
        assert!(matches!(err, PrimeError::ConfigParseError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[enumeration]\nmilestone_interval = 10\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.milestone_interval(), Some(10));
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/definitely/not/here/primes.toml").unwrap_err();
        assert!(matches!(err, PrimeError::ConfigParseError { .. }));
    }
}
