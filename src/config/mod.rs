// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envsnap.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envsnap.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. ENVSNAP_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVSNAP_GLOBAL__OUTPUT_LOG_LEVEL=4       → global.output_log_level = 4
//! ENVSNAP_SERVICE__REFRESH_INTERVAL=0.25   → service.refresh_interval = 0.25
//! ENVSNAP_DISPLAY__GROUPS=process,user     → display.groups = ["process", "user"]
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::snapshot::{FieldGroup, Redaction};

pub use loader::ConfigLoader;
use types::{DisplayConfig, GlobalConfig, ServiceConfig};

/// Name of the optional configuration file read from the current directory.
pub const LOCAL_CONFIG_FILE: &str = "envsnap.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ENVSNAP";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Snapshot service options.
    pub service: ServiceConfig,
    /// Output options.
    pub display: DisplayConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envsnap::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envsnap.toml")
    ///     .with_env_prefix("ENVSNAP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate every value that serde alone cannot check.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a negative or non-finite
    /// refresh interval, an unknown field group, or an invalid redact pattern.
    pub fn validate(&self) -> Result<()> {
        self.refresh_interval()?;
        self.field_groups()?;
        self.redaction()?;
        Ok(())
    }

    /// The refresh interval as a `Duration`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the value is negative, NaN,
    /// infinite, or too large.
    pub fn refresh_interval(&self) -> std::result::Result<Duration, ConfigError> {
        parse_interval(self.service.refresh_interval)
    }

    /// The configured display groups.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown group name.
    pub fn field_groups(&self) -> std::result::Result<FieldGroup, ConfigError> {
        FieldGroup::parse_list(&self.display.groups)
    }

    /// The configured environment variable redaction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an invalid glob pattern.
    pub fn redaction(&self) -> std::result::Result<Redaction, ConfigError> {
        Redaction::new(&self.display.redact)
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_service_options(&mut options);
        self.format_display_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), self.global.log_file.clone());
    }

    fn format_service_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "service.refresh_interval".into(),
            self.service.refresh_interval.to_string(),
        );
    }

    fn format_display_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("display.format".into(), self.display.format.to_string());
        options.insert(
            "display.changes_only".into(),
            self.display.changes_only.to_string(),
        );
        options.insert("display.groups".into(), self.display.groups.join(","));
        options.insert("display.redact".into(), self.display.redact.join(","));
    }
}

/// Converts seconds to a `Duration`, rejecting negative and non-finite values.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming `service.refresh_interval`.
pub fn parse_interval(seconds: f64) -> std::result::Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(seconds).map_err(|e| ConfigError::InvalidValue {
        section: "service".to_string(),
        key: "refresh_interval".to_string(),
        message: format!("expected finite seconds >= 0, got {seconds} ({e})"),
    })
}
