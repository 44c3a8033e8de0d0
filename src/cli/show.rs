// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `show` command arguments.

use clap::Args;

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Print the snapshot as JSON.
    #[arg(long)]
    pub json: bool,

    /// Field group to print (process, machine, user, runtime, environment,
    /// drives, all). Can be specified multiple times.
    #[arg(short = 'g', long = "group", value_name = "GROUP", action = clap::ArgAction::Append)]
    pub groups: Vec<String>,

    /// Print environment variable values without redaction.
    #[arg(long = "no-redact")]
    pub no_redact: bool,
}

impl ShowArgs {
    /// Converts the arguments to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        display_overrides(self.json, &self.groups, self.no_redact)
    }
}

/// Overrides shared by `show` and `watch`.
pub(crate) fn display_overrides(
    json: bool,
    groups: &[String],
    no_redact: bool,
) -> Vec<(&'static str, config::Value)> {
    let mut overrides: Vec<(&'static str, config::Value)> = Vec::new();
    if json {
        overrides.push(("display.format", "json".into()));
    }
    if !groups.is_empty() {
        overrides.push(("display.groups", groups.to_vec().into()));
    }
    if no_redact {
        overrides.push(("display.redact", Vec::<String>::new().into()));
    }
    overrides
}
