// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig, ServiceConfig, DisplayConfig
//! OutputFormat: Text (default) | Json
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogLevel;
use crate::snapshot::redact::DEFAULT_PATTERNS;

/// Snapshot output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                section: "display".to_string(),
                key: "format".to_string(),
                message: format!("expected 'text' or 'json', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; empty disables the file log.
    pub log_file: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: String::new(),
        }
    }
}

/// Snapshot service options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Minimum seconds between automatic refreshes.
    pub refresh_interval: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            refresh_interval: 1.0,
        }
    }
}

/// Output options for `show` and `watch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    /// After the first refresh, `watch` prints only rows that changed.
    pub changes_only: bool,
    /// Field groups to print.
    pub groups: Vec<String>,
    /// Glob patterns of environment variable names whose values are hidden.
    pub redact: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            changes_only: false,
            groups: ["process", "machine", "user", "runtime", "environment", "drives"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            redact: DEFAULT_PATTERNS.iter().map(ToString::to_string).collect(),
        }
    }
}
