use thiserror::Error;

/// Run-level failures. Anything in here aborts the batch before a summary is written;
/// row-level problems are reported through `InvalidReason` and `SubmitFailure` instead.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("CSV missing required columns. Expected: [{}] (missing: {})", expected.join(", "), missing.join(", "))]
    SchemaError {
        expected: Vec<String>,
        missing: Vec<String>,
    },

    #[error("CSV processing error: {0}")]
    ParseError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Parse,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::FileNotFound { .. } => ErrorCategory::Input,
            ImportError::SchemaError { .. } => ErrorCategory::Schema,
            ImportError::ParseError(_) => ErrorCategory::Parse,
            ImportError::IoError(_) => ErrorCategory::System,
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Schema | ErrorCategory::Parse => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::FileNotFound { .. } => "Check the input file path and try again",
            ImportError::SchemaError { .. } => {
                "Add a header row containing the name, email and role columns"
            }
            ImportError::ParseError(_) => {
                "Make sure the file is valid UTF-8 comma-separated text"
            }
            ImportError::IoError(_) => "Check file permissions and available disk space",
            ImportError::ConfigError { .. }
            | ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Input file problem: {}", self),
            ErrorCategory::Schema => format!("Input file has the wrong columns: {}", self),
            ErrorCategory::Parse => format!("Could not read the input file: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
