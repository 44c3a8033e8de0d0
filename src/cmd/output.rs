// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Snapshot rendering for `show` and `watch`.
//!
//! ```text
//! Output::from_config(config)   format + groups + redaction
//!   render(snapshot)            full text / JSON
//!   render_changes(new, old)    changed rows only, None if nothing changed
//! ```

use std::collections::BTreeMap;

use crate::config::Config;
use crate::config::types::OutputFormat;
use crate::error::{ConfigError, Result};
use crate::snapshot::{EnvironmentSnapshot, FieldGroup, Redaction};

/// Marker for a row present in the previous snapshot but not the current one.
const REMOVED: &str = "<removed>";

/// Display settings resolved from configuration.
#[derive(Debug)]
pub struct Output {
    format: OutputFormat,
    groups: FieldGroup,
    redaction: Redaction,
}

impl Output {
    #[must_use]
    pub const fn new(format: OutputFormat, groups: FieldGroup, redaction: Redaction) -> Self {
        Self {
            format,
            groups,
            redaction,
        }
    }

    /// Resolves the `[display]` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown group or an invalid
    /// redact pattern.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(
            config.display.format,
            config.field_groups()?,
            config.redaction()?,
        ))
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders the whole snapshot, redacted.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, snapshot: &EnvironmentSnapshot) -> Result<String> {
        let snapshot = snapshot.redacted(&self.redaction);
        match self.format {
            OutputFormat::Text => Ok(snapshot.render_text(self.groups)),
            OutputFormat::Json => {
                let mut json = snapshot.render_json(self.groups)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Renders only what changed since `previous`.
    ///
    /// Text output lists changed rows (`env.KEY` rows individually); JSON
    /// output is an object of the changed fields. Returns `None` when no
    /// selected field changed.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_changes(
        &self,
        snapshot: &EnvironmentSnapshot,
        previous: &EnvironmentSnapshot,
    ) -> Result<Option<String>> {
        let current = snapshot.redacted(&self.redaction);
        let previous = previous.redacted(&self.redaction);

        match self.format {
            OutputFormat::Text => {
                let rows = changed_rows(&current, &previous, self.groups);
                if rows.is_empty() {
                    return Ok(None);
                }
                let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
                let text = rows
                    .iter()
                    .map(|(name, value)| format!("{name:<width$} = {value}\n"))
                    .collect();
                Ok(Some(text))
            }
            OutputFormat::Json => {
                let changed: Vec<&str> = current
                    .changed_fields(&previous)
                    .into_iter()
                    .filter(|name| FieldGroup::of(name).is_some_and(|g| self.groups.intersects(g)))
                    .collect();
                if changed.is_empty() {
                    return Ok(None);
                }
                let mut value = serde_json::to_value(&current)?;
                if let Some(object) = value.as_object_mut() {
                    object.retain(|name, _| changed.contains(&name.as_str()));
                }
                let mut json = serde_json::to_string_pretty(&value)?;
                json.push('\n');
                Ok(Some(json))
            }
        }
    }
}

/// Rows of `current` whose value differs from `previous`, followed by rows
/// that disappeared.
fn changed_rows(
    current: &EnvironmentSnapshot,
    previous: &EnvironmentSnapshot,
    groups: FieldGroup,
) -> Vec<(String, String)> {
    let mut old: BTreeMap<String, String> = previous.rows(groups).into_iter().collect();

    let mut rows: Vec<(String, String)> = current
        .rows(groups)
        .into_iter()
        .filter(|(name, value)| old.remove(name).as_ref() != Some(value))
        .collect();

    rows.extend(
        old.into_keys()
            .filter(|name| name.starts_with("env."))
            .map(|name| (name, REMOVED.to_string())),
    );
    rows
}
