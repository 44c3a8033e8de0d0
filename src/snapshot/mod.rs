// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The environment snapshot record.
//!
//! ```text
//! EnvironmentSnapshot (plain value, replaced wholesale per refresh)
//!   scalars      exit_code .. is_64bit_operating_system
//!   sequences    command_line_args, logical_drives   (never absent)
//!   mapping      environment_variables               (BTreeMap, unique keys)
//!
//! render   rows(groups) / render_text / render_json
//! diff     changed_fields(&previous)
//! redact   redacted(&Redaction) -> copy with hidden env values
//! ```

pub mod redact;
pub mod render;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use redact::Redaction;
pub use render::FieldGroup;

/// One consistent observation of host environment state.
///
/// `Default` is the zero/empty record a service publishes before its first
/// refresh, and also the per-field fallback when a host query fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSnapshot {
    pub exit_code: i32,
    pub is_64bit_process: bool,
    pub current_managed_thread_id: u64,
    pub current_directory: String,
    pub command_line: String,
    pub machine_name: String,
    pub new_line: String,
    pub os_version: String,
    /// Logical processors available to this process. At least 1 once refreshed.
    pub processor_count: usize,
    /// Empty where backtraces are unsupported.
    pub stack_trace: String,
    pub system_directory: String,
    pub system_page_size: u64,
    /// Milliseconds since host boot, wrapping at `u32::MAX`.
    pub tick_count: u32,
    pub user_domain_name: String,
    pub user_interactive: bool,
    pub user_name: String,
    /// Version of the envsnap runtime that took the snapshot.
    pub version: String,
    pub working_set_bytes: u64,
    pub has_shutdown_started: bool,
    pub is_64bit_operating_system: bool,
    pub command_line_args: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub logical_drives: Vec<String>,
}

/// Fields whose value changes on nearly every refresh.
pub const VOLATILE_FIELDS: &[&str] = &["tick_count", "stack_trace", "working_set_bytes"];

impl EnvironmentSnapshot {
    /// Returns true if this is the untouched pre-refresh record.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields that differ between `self` and `previous`,
    /// in declaration order.
    #[must_use]
    pub fn changed_fields(&self, previous: &Self) -> Vec<&'static str> {
        let mut changed: Vec<&'static str> = self
            .scalar_rows()
            .into_iter()
            .zip(previous.scalar_rows())
            .filter(|((_, new), (_, old))| new != old)
            .map(|((name, _), _)| name)
            .collect();

        if self.command_line_args != previous.command_line_args {
            changed.push("command_line_args");
        }
        if self.environment_variables != previous.environment_variables {
            changed.push("environment_variables");
        }
        if self.logical_drives != previous.logical_drives {
            changed.push("logical_drives");
        }
        changed
    }

    /// Returns a copy with sensitive environment values hidden.
    #[must_use]
    pub fn redacted(&self, redaction: &Redaction) -> Self {
        let mut copy = self.clone();
        for (key, value) in &mut copy.environment_variables {
            if redaction.is_sensitive(key) {
                *value = redact::HIDDEN.to_string();
            }
        }
        copy
    }
}
