#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogConfig;
use crate::utils::validation::{validate_path, validate_url, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_INPUT_FILE: &str = "users.csv";
/// Placeholder; real runs must point this at the actual service.
pub const DEFAULT_API_ENDPOINT: &str = "https://example.com/api/create_user";
pub const DEFAULT_LOG_FILE: &str = "error_log.txt";

/// Values given explicitly on the command line. They win over the TOML file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_file: Option<String>,
    pub api_endpoint: Option<String>,
    pub log_file: Option<String>,
    pub verbose: bool,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_file: PathBuf,
    pub api_endpoint: String,
    pub log_file: PathBuf,
    pub console: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, &Overrides::default())
    }
}

impl Settings {
    /// Command line first, then the TOML file, then built-in defaults.
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Self {
        let input_file = overrides
            .input_file
            .clone()
            .or_else(|| file.and_then(|f| f.input.path.clone()))
            .unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string());

        let api_endpoint = overrides
            .api_endpoint
            .clone()
            .or_else(|| file.and_then(|f| f.api.endpoint.clone()))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let log_file = overrides
            .log_file
            .clone()
            .or_else(|| file.and_then(|f| f.logging.file.clone()))
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let console = file.and_then(|f| f.logging.console).unwrap_or(true);

        Self {
            input_file: PathBuf::from(input_file),
            api_endpoint,
            log_file: PathBuf::from(log_file),
            console,
            verbose: overrides.verbose,
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_file: Some(self.log_file.clone()),
            console: self.console,
            verbose: self.verbose,
        }
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &Path {
        &self.input_file
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn log_file(&self) -> &Path {
        &self.log_file
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api_endpoint)?;
        validate_path("input.path", &self.input_file.to_string_lossy())?;
        validate_path("logging.file", &self.log_file.to_string_lossy())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.input_path(), Path::new("users.csv"));
        assert_eq!(settings.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(settings.log_file(), Path::new("error_log.txt"));
        assert!(settings.console);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_command_line_beats_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[input]
path = "from_file.csv"

[api]
endpoint = "https://file.example.com/users"

[logging]
console = false
"#,
        )
        .unwrap();
        let overrides = Overrides {
            api_endpoint: Some("https://cli.example.com/users".to_string()),
            ..Overrides::default()
        };

        let settings = Settings::resolve(Some(&file), &overrides);

        assert_eq!(settings.input_file, PathBuf::from("from_file.csv"));
        assert_eq!(settings.api_endpoint, "https://cli.example.com/users");
        assert!(!settings.console);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let bad_endpoint = Settings {
            api_endpoint: "example.com/users".to_string(),
            ..Settings::default()
        };
        assert!(bad_endpoint.validate().is_err());

        let empty_input = Settings {
            input_file: PathBuf::from("  "),
            ..Settings::default()
        };
        assert!(empty_input.validate().is_err());
    }
}
