// Rust guideline compliant 2026-10-12

//! Configuration management for preferred-id.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Resource information model a request and its response are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InformationModel {
    /// FHIR STU3.
    FhirR3,
    /// FHIR R4.
    #[default]
    FhirR4,
    /// FHIR R5.
    FhirR5,
}

impl InformationModel {
    /// Returns the configuration code of the model.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            InformationModel::FhirR3 => "fhir_r3",
            InformationModel::FhirR4 => "fhir_r4",
            InformationModel::FhirR5 => "fhir_r5",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "fhir_r3" => Some(InformationModel::FhirR3),
            "fhir_r4" => Some(InformationModel::FhirR4),
            "fhir_r5" => Some(InformationModel::FhirR5),
            _ => None,
        }
    }
}

impl fmt::Display for InformationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Log levels accepted by `log_level`.
pub const LOG_LEVELS: [&str; 4] = ["error", "warn", "info", "debug"];

/// Configuration for preferred-id behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL the server answers on; passed to search providers.
    #[serde(default = "default_server_base")]
    pub server_base: String,

    /// Information model requests are served in.
    #[serde(default)]
    pub information_model: InformationModel,

    /// Whether response payloads are pretty-printed.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Log level for the server surfaces.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_server_base() -> String {
    "http://localhost:4080/".to_string()
}

fn default_pretty_json() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_base: default_server_base(),
            information_model: InformationModel::default(),
            pretty_json: default_pretty_json(),
            output_format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.preferred-id/config.toml`
    /// 3. Environment variables with `PREFERRED_ID_` prefix
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the `.preferred-id` directory
    ///
    /// # Returns
    ///
    /// A Config with values from file and environment variables applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = data_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PREFERRED_ID_SERVER_BASE` - Server base URL
    /// - `PREFERRED_ID_INFORMATION_MODEL` - fhir_r3/fhir_r4/fhir_r5
    /// - `PREFERRED_ID_PRETTY_JSON` - Pretty-print payloads (true/false)
    /// - `PREFERRED_ID_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `PREFERRED_ID_LOG_LEVEL` - Log level (error/warn/info/debug)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PREFERRED_ID_SERVER_BASE") {
            self.server_base = val;
        }

        if let Ok(val) = std::env::var("PREFERRED_ID_INFORMATION_MODEL") {
            self.information_model = InformationModel::parse(&val).ok_or_else(|| {
                Error::InvalidConfig(
                    "PREFERRED_ID_INFORMATION_MODEL must be fhir_r3, fhir_r4, or fhir_r5"
                        .to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("PREFERRED_ID_PRETTY_JSON") {
            self.pretty_json = val.parse().map_err(|_| {
                Error::InvalidConfig("PREFERRED_ID_PRETTY_JSON must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("PREFERRED_ID_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::InvalidConfig(
                        "PREFERRED_ID_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("PREFERRED_ID_LOG_LEVEL") {
            self.log_level = val.to_lowercase();
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - server_base is not an http(s) URL
    /// - log_level is not one of error, warn, info, debug
    fn validate(&self) -> Result<()> {
        if !(self.server_base.starts_with("http://") || self.server_base.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "server_base must be an http(s) URL, got {}",
                self.server_base
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the `.preferred-id` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
