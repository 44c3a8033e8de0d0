// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host environment queries.
//!
//! # Architecture
//!
//! ```text
//! EnvironmentReader (one probe per snapshot field, HostResult<T>)
//!   SystemReader     sysinfo + std + platform probes (windows.rs / unix.rs)
//!   FixedReader      replays a prepared snapshot (tests, embedders)
//!
//! capture(&mut reader)
//!   begin_observation()        refresh per-pass host state once
//!   probe every field          Err(HostQueryError) --> field default + debug log
//!   --> EnvironmentSnapshot    built off-line, published by the service
//! ```
//!
//! Process-wide state that std does not track (exit code, shutdown flag,
//! stable thread ids) lives in [`process`].

pub mod fixed;
pub mod process;
pub mod system;
pub mod vars;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::error::HostResult;
use crate::logging::log_degraded_field;
use crate::snapshot::EnvironmentSnapshot;

pub use fixed::FixedReader;
pub use system::SystemReader;

/// Source of host environment properties.
///
/// Every probe may fail independently; [`capture`] substitutes the field's
/// default on failure. `begin_observation` runs once at the start of each
/// pass so readers can refresh cached host state a single time.
pub trait EnvironmentReader {
    /// Prepares a new observation pass.
    ///
    /// # Errors
    ///
    /// Returns an error if per-pass host state could not be refreshed. The
    /// pass still continues; probes that depend on it fail on their own.
    fn begin_observation(&mut self) -> HostResult<()> {
        Ok(())
    }

    fn exit_code(&self) -> HostResult<i32>;
    fn is_64bit_process(&self) -> HostResult<bool>;
    fn current_managed_thread_id(&self) -> HostResult<u64>;
    fn current_directory(&self) -> HostResult<String>;
    fn machine_name(&self) -> HostResult<String>;
    fn new_line(&self) -> HostResult<String>;
    fn os_version(&self) -> HostResult<String>;
    fn processor_count(&self) -> HostResult<usize>;
    fn stack_trace(&self) -> HostResult<String>;
    fn system_directory(&self) -> HostResult<String>;
    fn system_page_size(&self) -> HostResult<u64>;
    fn tick_count(&self) -> HostResult<u32>;
    fn user_domain_name(&self) -> HostResult<String>;
    fn user_interactive(&self) -> HostResult<bool>;
    fn user_name(&self) -> HostResult<String>;
    fn version(&self) -> HostResult<String>;
    fn working_set_bytes(&self) -> HostResult<u64>;
    fn has_shutdown_started(&self) -> HostResult<bool>;
    fn is_64bit_operating_system(&self) -> HostResult<bool>;
    fn command_line_args(&self) -> HostResult<Vec<String>>;
    fn environment_variables(&self) -> HostResult<BTreeMap<String, String>>;
    fn logical_drives(&self) -> HostResult<Vec<String>>;

    /// Full command line. Defaults to the arguments joined by [`join_command_line`].
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be read.
    fn command_line(&self) -> HostResult<String> {
        self.command_line_args().map(|args| join_command_line(&args))
    }
}

/// Reads every field from `reader` into a new snapshot.
///
/// Never fails: a probe error leaves its field at the default value
/// (`processor_count` falls back to 1) and is logged at debug level.
pub fn capture<R: EnvironmentReader + ?Sized>(reader: &mut R) -> EnvironmentSnapshot {
    if let Err(err) = reader.begin_observation() {
        log_degraded_field(&err);
    }

    EnvironmentSnapshot {
        exit_code: or_default(reader.exit_code()),
        is_64bit_process: or_default(reader.is_64bit_process()),
        current_managed_thread_id: or_default(reader.current_managed_thread_id()),
        current_directory: or_default(reader.current_directory()),
        command_line: or_default(reader.command_line()),
        machine_name: or_default(reader.machine_name()),
        new_line: or_default(reader.new_line()),
        os_version: or_default(reader.os_version()),
        processor_count: or_default(reader.processor_count()).max(1),
        stack_trace: or_default(reader.stack_trace()),
        system_directory: or_default(reader.system_directory()),
        system_page_size: or_default(reader.system_page_size()),
        tick_count: or_default(reader.tick_count()),
        user_domain_name: or_default(reader.user_domain_name()),
        user_interactive: or_default(reader.user_interactive()),
        user_name: or_default(reader.user_name()),
        version: or_default(reader.version()),
        working_set_bytes: or_default(reader.working_set_bytes()),
        has_shutdown_started: or_default(reader.has_shutdown_started()),
        is_64bit_operating_system: or_default(reader.is_64bit_operating_system()),
        command_line_args: or_default(reader.command_line_args()),
        environment_variables: or_default(reader.environment_variables()),
        logical_drives: or_default(reader.logical_drives()),
    }
}

fn or_default<T: Default>(result: HostResult<T>) -> T {
    result.unwrap_or_else(|err| {
        log_degraded_field(&err);
        T::default()
    })
}

/// Joins arguments into one command line string.
///
/// Arguments that are empty or contain whitespace or quotes are wrapped in
/// double quotes, with embedded quotes backslash-escaped.
#[must_use]
pub fn join_command_line<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
                format!("\"{}\"", arg.replace('"', "\\\""))
            } else {
                arg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
