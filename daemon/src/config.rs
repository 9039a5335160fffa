//! Host configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ballot_utils::LogFormat;

use crate::DaemonError;

/// Runtime settings for the `ballot` binary.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Command-line flags and environment variables override file values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Abort the replay at the first rejected action.
    #[serde(default)]
    pub strict: bool,

    /// Print the final report as JSON instead of text.
    #[serde(default)]
    pub json_output: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        toml::from_str(s).map_err(|e| DaemonError::Config(e.to_string()))
    }

    /// Apply command-line / environment values on top of this configuration.
    ///
    /// `None` keeps the current value; `Some` replaces it, so a flag can turn
    /// a file setting off as well as on.
    pub fn with_overrides(
        self,
        log_level: Option<String>,
        log_format: Option<LogFormat>,
        strict: Option<bool>,
        json_output: Option<bool>,
    ) -> Self {
        Self {
            log_level: log_level.unwrap_or(self.log_level),
            log_format: log_format.unwrap_or(self.log_format),
            strict: strict.unwrap_or(self.strict),
            json_output: json_output.unwrap_or(self.json_output),
        }
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, DaemonError> {
        toml::to_string_pretty(self).map_err(|e| DaemonError::Config(e.to_string()))
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            strict: false,
            json_output: false,
        }
    }
}
