use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimeError {
    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PrimeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PrimeError::ConfigParseError { .. } | PrimeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PrimeError::CsvError(_) | PrimeError::IoError(_) => ErrorCategory::Output,
            PrimeError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PrimeError::InvalidConfigValueError { field, .. } => {
                format!("Check the value given for '{}'", field)
            }
            PrimeError::ConfigParseError { .. } => {
                "Make sure the config file exists and is valid TOML".to_string()
            }
            PrimeError::IoError(_) | PrimeError::CsvError(_) => {
                "Check that the output path is writable".to_string()
            }
            PrimeError::SerializationError(_) => "Retry with --format text".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrimeError>;
