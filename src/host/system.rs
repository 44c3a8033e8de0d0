// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The host-backed [`EnvironmentReader`].
//!
//! ```text
//! SystemReader
//!   sysinfo   host name, OS version, process memory, disks
//!   std       cwd, args, vars, parallelism, backtrace, terminal check
//!   process   exit code, shutdown flag, thread ids
//!   platform  system directory, page size, boot clock, OS bitness
//!             (windows.rs / unix.rs)
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::{BTreeMap, HashSet};
use std::io::IsTerminal;

use sysinfo::{Disks, Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::{EnvironmentReader, process, vars};
use crate::error::{HostQueryError, HostResult};

#[cfg(unix)]
use super::unix as platform;
#[cfg(windows)]
use super::windows as platform;

/// Reads the real host environment.
///
/// Holds a `sysinfo::System` so the current process entry is refreshed once
/// per observation instead of once per probe.
pub struct SystemReader {
    system: System,
    pid: Option<Pid>,
}

impl Default for SystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemReader {
    #[must_use]
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| tracing::debug!(error = e, "current pid unavailable"))
            .ok();
        Self {
            system: System::new(),
            pid,
        }
    }
}

fn env_var(field: &'static str, names: &[&str]) -> HostResult<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
        .ok_or_else(|| HostQueryError::unavailable(field, format!("none of {names:?} is set")))
}

/// Drops repeated entries, keeping the first occurrence of each.
pub(crate) fn unique_in_order<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

impl EnvironmentReader for SystemReader {
    fn begin_observation(&mut self) -> HostResult<()> {
        let pid = self.pid.ok_or_else(|| {
            HostQueryError::unavailable("working_set_bytes", "current process id is unknown")
        })?;
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        Ok(())
    }

    fn exit_code(&self) -> HostResult<i32> {
        Ok(process::exit_code())
    }

    fn is_64bit_process(&self) -> HostResult<bool> {
        Ok(cfg!(target_pointer_width = "64"))
    }

    fn current_managed_thread_id(&self) -> HostResult<u64> {
        Ok(process::managed_thread_id())
    }

    fn current_directory(&self) -> HostResult<String> {
        std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .map_err(|source| HostQueryError::Io {
                field: "current_directory",
                source,
            })
    }

    fn machine_name(&self) -> HostResult<String> {
        System::host_name()
            .ok_or_else(|| HostQueryError::unavailable("machine_name", "host name not reported"))
    }

    fn new_line(&self) -> HostResult<String> {
        Ok(if cfg!(windows) { "\r\n" } else { "\n" }.to_string())
    }

    fn os_version(&self) -> HostResult<String> {
        System::long_os_version()
            .or_else(|| {
                let name = System::name()?;
                Some(match System::kernel_version() {
                    Some(kernel) => format!("{name} {kernel}"),
                    None => name,
                })
            })
            .ok_or_else(|| HostQueryError::unavailable("os_version", "OS version not reported"))
    }

    fn processor_count(&self) -> HostResult<usize> {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .map_err(|source| HostQueryError::Io {
                field: "processor_count",
                source,
            })
    }

    fn stack_trace(&self) -> HostResult<String> {
        let trace = Backtrace::force_capture();
        match trace.status() {
            BacktraceStatus::Captured => Ok(trace.to_string()),
            _ => Err(HostQueryError::unavailable(
                "stack_trace",
                "backtraces are not supported on this target",
            )),
        }
    }

    fn system_directory(&self) -> HostResult<String> {
        platform::system_directory()
    }

    fn system_page_size(&self) -> HostResult<u64> {
        platform::system_page_size()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn tick_count(&self) -> HostResult<u32> {
        // Truncation is the wrap of a 32-bit millisecond counter.
        platform::boot_millis().map(|millis| millis as u32)
    }

    fn user_domain_name(&self) -> HostResult<String> {
        if cfg!(windows) {
            env_var("user_domain_name", &["USERDOMAIN"])
        } else {
            self.machine_name()
        }
    }

    fn user_interactive(&self) -> HostResult<bool> {
        Ok(std::io::stdin().is_terminal() || std::io::stdout().is_terminal())
    }

    fn user_name(&self) -> HostResult<String> {
        env_var("user_name", &["USER", "USERNAME", "LOGNAME"])
    }

    fn version(&self) -> HostResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    fn working_set_bytes(&self) -> HostResult<u64> {
        self.pid
            .and_then(|pid| self.system.process(pid))
            .map(sysinfo::Process::memory)
            .ok_or_else(|| {
                HostQueryError::unavailable("working_set_bytes", "current process not found")
            })
    }

    fn has_shutdown_started(&self) -> HostResult<bool> {
        Ok(process::has_shutdown_started())
    }

    fn is_64bit_operating_system(&self) -> HostResult<bool> {
        if cfg!(target_pointer_width = "64") {
            return Ok(true);
        }
        platform::is_64bit_operating_system()
    }

    fn command_line_args(&self) -> HostResult<Vec<String>> {
        Ok(std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect())
    }

    fn environment_variables(&self) -> HostResult<BTreeMap<String, String>> {
        Ok(vars::current_vars())
    }

    fn logical_drives(&self) -> HostResult<Vec<String>> {
        let disks = Disks::new_with_refreshed_list();
        Ok(unique_in_order(
            disks
                .list()
                .iter()
                .map(|disk| disk.mount_point().display().to_string()),
        ))
    }
}
