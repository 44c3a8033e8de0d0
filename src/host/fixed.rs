// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A reader that replays a prepared snapshot.
//!
//! Lets embedders and tests drive a service deterministically. An optional
//! update hook mutates the prepared snapshot at the start of every pass.

use std::collections::BTreeMap;

use super::EnvironmentReader;
use crate::error::HostResult;
use crate::snapshot::EnvironmentSnapshot;

type Update = Box<dyn FnMut(&mut EnvironmentSnapshot, u64) + Send>;

/// Answers every probe from a stored [`EnvironmentSnapshot`].
pub struct FixedReader {
    snapshot: EnvironmentSnapshot,
    update: Option<Update>,
    observations: u64,
}

impl FixedReader {
    #[must_use]
    pub fn new(snapshot: EnvironmentSnapshot) -> Self {
        Self {
            snapshot,
            update: None,
            observations: 0,
        }
    }

    /// Runs `update` with the pass number (starting at 1) before every pass.
    #[must_use]
    pub fn with_update<F>(mut self, update: F) -> Self
    where
        F: FnMut(&mut EnvironmentSnapshot, u64) + Send + 'static,
    {
        self.update = Some(Box::new(update));
        self
    }

    /// Number of observation passes so far.
    #[must_use]
    pub const fn observations(&self) -> u64 {
        self.observations
    }
}

impl std::fmt::Debug for FixedReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedReader")
            .field("observations", &self.observations)
            .finish_non_exhaustive()
    }
}

impl EnvironmentReader for FixedReader {
    fn begin_observation(&mut self) -> HostResult<()> {
        self.observations += 1;
        if let Some(update) = self.update.as_mut() {
            update(&mut self.snapshot, self.observations);
        }
        Ok(())
    }

    fn exit_code(&self) -> HostResult<i32> {
        Ok(self.snapshot.exit_code)
    }
    fn is_64bit_process(&self) -> HostResult<bool> {
        Ok(self.snapshot.is_64bit_process)
    }
    fn current_managed_thread_id(&self) -> HostResult<u64> {
        Ok(self.snapshot.current_managed_thread_id)
    }
    fn current_directory(&self) -> HostResult<String> {
        Ok(self.snapshot.current_directory.clone())
    }
    fn machine_name(&self) -> HostResult<String> {
        Ok(self.snapshot.machine_name.clone())
    }
    fn new_line(&self) -> HostResult<String> {
        Ok(self.snapshot.new_line.clone())
    }
    fn os_version(&self) -> HostResult<String> {
        Ok(self.snapshot.os_version.clone())
    }
    fn processor_count(&self) -> HostResult<usize> {
        Ok(self.snapshot.processor_count)
    }
    fn stack_trace(&self) -> HostResult<String> {
        Ok(self.snapshot.stack_trace.clone())
    }
    fn system_directory(&self) -> HostResult<String> {
        Ok(self.snapshot.system_directory.clone())
    }
    fn system_page_size(&self) -> HostResult<u64> {
        Ok(self.snapshot.system_page_size)
    }
    fn tick_count(&self) -> HostResult<u32> {
        Ok(self.snapshot.tick_count)
    }
    fn user_domain_name(&self) -> HostResult<String> {
        Ok(self.snapshot.user_domain_name.clone())
    }
    fn user_interactive(&self) -> HostResult<bool> {
        Ok(self.snapshot.user_interactive)
    }
    fn user_name(&self) -> HostResult<String> {
        Ok(self.snapshot.user_name.clone())
    }
    fn version(&self) -> HostResult<String> {
        Ok(self.snapshot.version.clone())
    }
    fn working_set_bytes(&self) -> HostResult<u64> {
        Ok(self.snapshot.working_set_bytes)
    }
    fn has_shutdown_started(&self) -> HostResult<bool> {
        Ok(self.snapshot.has_shutdown_started)
    }
    fn is_64bit_operating_system(&self) -> HostResult<bool> {
        Ok(self.snapshot.is_64bit_operating_system)
    }
    fn command_line_args(&self) -> HostResult<Vec<String>> {
        Ok(self.snapshot.command_line_args.clone())
    }
    fn environment_variables(&self) -> HostResult<BTreeMap<String, String>> {
        Ok(self.snapshot.environment_variables.clone())
    }
    fn logical_drives(&self) -> HostResult<Vec<String>> {
        Ok(self.snapshot.logical_drives.clone())
    }

    fn command_line(&self) -> HostResult<String> {
        Ok(self.snapshot.command_line.clone())
    }
}
