// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display rendering for snapshots.
//!
//! ```text
//! rows(groups)        [(name, value)]   declaration order, env.KEY per variable
//! render_text(groups) "name = value" lines, keys left-aligned
//! render_json(groups) pretty JSON object, unselected groups dropped
//! ```

use bitflags::bitflags;
use std::fmt::Write as _;

use super::EnvironmentSnapshot;
use crate::error::ConfigError;

bitflags! {
    /// Field groups selectable for display.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldGroup: u8 {
        /// Exit code, thread, directory, command line, memory, stack trace.
        const PROCESS = 0x01;

        /// Host name, OS, processors, page size, uptime.
        const MACHINE = 0x02;

        /// User name, domain, interactivity.
        const USER = 0x04;

        /// envsnap runtime version.
        const RUNTIME = 0x08;

        /// Environment variables.
        const ENVIRONMENT = 0x10;

        /// Logical drives / mount points.
        const DRIVES = 0x20;
    }
}

impl Default for FieldGroup {
    fn default() -> Self {
        Self::all()
    }
}

impl FieldGroup {
    /// Group a snapshot field belongs to, by its serialized name.
    #[must_use]
    pub fn of(field: &str) -> Option<Self> {
        let group = match field {
            "exit_code"
            | "is_64bit_process"
            | "current_managed_thread_id"
            | "current_directory"
            | "command_line"
            | "stack_trace"
            | "working_set_bytes"
            | "has_shutdown_started"
            | "command_line_args" => Self::PROCESS,
            "machine_name"
            | "new_line"
            | "os_version"
            | "processor_count"
            | "system_directory"
            | "system_page_size"
            | "tick_count"
            | "is_64bit_operating_system" => Self::MACHINE,
            "user_domain_name" | "user_interactive" | "user_name" => Self::USER,
            "version" => Self::RUNTIME,
            "environment_variables" => Self::ENVIRONMENT,
            "logical_drives" => Self::DRIVES,
            _ => return None,
        };
        Some(group)
    }

    /// Parses a list of lowercase group names (`"process"`, `"env"`, ...).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first unknown group.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        names.iter().try_fold(Self::empty(), |acc, name| {
            let group = match name.as_ref().trim().to_ascii_lowercase().as_str() {
                "process" => Self::PROCESS,
                "machine" => Self::MACHINE,
                "user" => Self::USER,
                "runtime" => Self::RUNTIME,
                "environment" | "env" => Self::ENVIRONMENT,
                "drives" => Self::DRIVES,
                "all" => Self::all(),
                other => {
                    return Err(ConfigError::InvalidValue {
                        section: "display".to_string(),
                        key: "groups".to_string(),
                        message: format!(
                            "unknown field group '{other}', expected one of process, machine, user, runtime, environment, drives, all"
                        ),
                    });
                }
            };
            Ok(acc | group)
        })
    }
}

impl EnvironmentSnapshot {
    /// Every non-collection field as `(name, raw value)`, in declaration order.
    pub(crate) fn scalar_rows(&self) -> [(&'static str, String); 20] {
        [
            ("exit_code", self.exit_code.to_string()),
            ("is_64bit_process", self.is_64bit_process.to_string()),
            (
                "current_managed_thread_id",
                self.current_managed_thread_id.to_string(),
            ),
            ("current_directory", self.current_directory.clone()),
            ("command_line", self.command_line.clone()),
            ("machine_name", self.machine_name.clone()),
            ("new_line", self.new_line.escape_debug().to_string()),
            ("os_version", self.os_version.clone()),
            ("processor_count", self.processor_count.to_string()),
            ("stack_trace", self.stack_trace.clone()),
            ("system_directory", self.system_directory.clone()),
            ("system_page_size", self.system_page_size.to_string()),
            ("tick_count", self.tick_count.to_string()),
            ("user_domain_name", self.user_domain_name.clone()),
            ("user_interactive", self.user_interactive.to_string()),
            ("user_name", self.user_name.clone()),
            ("version", self.version.clone()),
            ("working_set_bytes", self.working_set_bytes.to_string()),
            ("has_shutdown_started", self.has_shutdown_started.to_string()),
            (
                "is_64bit_operating_system",
                self.is_64bit_operating_system.to_string(),
            ),
        ]
    }

    /// Display rows for the selected groups.
    ///
    /// The stack trace is summarized as a frame-line count; sequences are
    /// comma-joined; each environment variable gets its own `env.KEY` row.
    #[must_use]
    pub fn rows(&self, groups: FieldGroup) -> Vec<(String, String)> {
        let selected = |name: &str| FieldGroup::of(name).is_some_and(|g| groups.intersects(g));

        let mut rows: Vec<(String, String)> = self
            .scalar_rows()
            .into_iter()
            .filter(|(name, _)| selected(name))
            .map(|(name, value)| {
                let value = if name == "stack_trace" && !value.is_empty() {
                    format!("<{} lines>", value.lines().count())
                } else {
                    value
                };
                (name.to_string(), value)
            })
            .collect();

        if selected("command_line_args") {
            rows.push((
                "command_line_args".to_string(),
                self.command_line_args.join(", "),
            ));
        }
        if selected("logical_drives") {
            rows.push(("logical_drives".to_string(), self.logical_drives.join(", ")));
        }
        if selected("environment_variables") {
            rows.extend(
                self.environment_variables
                    .iter()
                    .map(|(key, value)| (format!("env.{key}"), value.clone())),
            );
        }
        rows
    }

    /// Renders the selected groups as aligned `name = value` lines.
    #[must_use]
    pub fn render_text(&self, groups: FieldGroup) -> String {
        let rows = self.rows(groups);
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        let mut out = String::new();
        for (name, value) in rows {
            let _ = writeln!(out, "{name:<width$} = {value}");
        }
        out
    }

    /// Renders the selected groups as a pretty-printed JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self, groups: FieldGroup) -> serde_json::Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let Some(object) = value.as_object_mut() {
            object.retain(|name, _| FieldGroup::of(name).is_some_and(|g| groups.intersects(g)));
        }
        serde_json::to_string_pretty(&value)
    }
}
