use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "user-import")]
#[command(about = "Create user accounts from a CSV file through an HTTP API")]
pub struct CliConfig {
    /// CSV file with name, email and role columns [default: users.csv]
    #[arg(long)]
    pub input_file: Option<String>,

    /// Account-creation endpoint [default: https://example.com/api/create_user]
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Append-only log file [default: error_log.txt]
    #[arg(long)]
    pub log_file: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            input_file: self.input_file.clone(),
            api_endpoint: self.api_endpoint.clone(),
            log_file: self.log_file.clone(),
            verbose: self.verbose,
        }
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Ok(Settings::resolve(file.as_ref(), &self.overrides()))
    }
}
