// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `watch` command arguments.
//!
//! ```text
//! --interval SECS   service.refresh_interval override
//! --count N         stop after N refreshes (default: until Ctrl-C)
//! --changes-only    after the first refresh, print only changed rows
//! ```

use clap::Args;

use super::show::display_overrides;

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct WatchArgs {
    /// Seconds between refreshes.
    #[arg(short = 'i', long, value_name = "SECS")]
    pub interval: Option<f64>,

    /// Stop after this many refreshes.
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// After the first refresh, print only rows whose value changed.
    #[arg(long = "changes-only")]
    pub changes_only: bool,

    /// Print each snapshot as JSON.
    #[arg(long)]
    pub json: bool,

    /// Field group to print. Can be specified multiple times.
    #[arg(short = 'g', long = "group", value_name = "GROUP", action = clap::ArgAction::Append)]
    pub groups: Vec<String>,

    /// Print environment variable values without redaction.
    #[arg(long = "no-redact")]
    pub no_redact: bool,
}

impl WatchArgs {
    /// Converts the arguments to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = display_overrides(self.json, &self.groups, self.no_redact);
        if let Some(interval) = self.interval {
            overrides.push(("service.refresh_interval", interval.into()));
        }
        if self.changes_only {
            overrides.push(("display.changes_only", true.into()));
        }
        overrides
    }
}
