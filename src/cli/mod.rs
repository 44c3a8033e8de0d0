// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envsnap using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envsnap [global options] <command>
//! version
//! options
//! inis
//! show  [--json] [--group G]... [--no-redact]
//! watch [--interval SECS] [--count N] [--changes-only] [--json]
//! ```

pub mod global;
pub mod show;
pub mod watch;


use crate::cli::global::GlobalOptions;
use crate::cli::show::ShowArgs;
use crate::cli::watch::WatchArgs;
use clap::{Parser, Subcommand};

/// Host Environment Snapshot Service
///
/// Captures a consistent snapshot of the host environment.
#[derive(Debug, Parser)]
#[command(
    name = "envsnap",
    author,
    version,
    about = "Host Environment Snapshot Service",
    long_about = "envsnap Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Captures process, machine and user properties of the host as\n\
                  one consistent snapshot. `envsnap show` refreshes once and\n\
                  prints it; `envsnap watch` keeps refreshing on an interval.\n\
                  See `envsnap <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  envsnap reads `envsnap.toml` from the current directory if it\n\
                  exists (disable with --no-default-config), then every file given\n\
                  with --config in order. ENVSNAP_SECTION__KEY environment variables\n\
                  and command-line flags override file values."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,

    /// Refreshes once and prints the snapshot.
    Show(ShowArgs),

    /// Refreshes on an interval and prints every snapshot.
    Watch(WatchArgs),
}

impl Cli {
    /// Configuration overrides from global options and the selected command.
    #[must_use]
    pub fn config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = self.global.to_config_overrides();
        match &self.command {
            Some(Command::Show(args)) => overrides.extend(args.to_config_overrides()),
            Some(Command::Watch(args)) => overrides.extend(args.to_config_overrides()),
            _ => {}
        }
        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
