// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `show`: one manual refresh, printed.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::host::EnvironmentReader;
use crate::service::{Clock, EnvironmentSnapshotService, MonotonicClock};

use super::output::Output;

/// Run the show command against the real host.
///
/// # Errors
///
/// Returns an error if the display settings are invalid or stdout cannot be
/// written.
pub fn run_show_command(config: &Config) -> Result<()> {
    let service = EnvironmentSnapshotService::for_host();
    let stdout = std::io::stdout();
    show(service, config, &mut stdout.lock())
}

/// Refreshes `service` once and writes the rendered snapshot to `out`.
///
/// # Errors
///
/// Returns an error if the display settings are invalid, rendering fails, or
/// `out` cannot be written.
pub fn show<R, W>(
    service: EnvironmentSnapshotService<R>,
    config: &Config,
    out: &mut W,
) -> Result<()>
where
    R: EnvironmentReader,
    W: Write,
{
    let output = Output::from_config(config)?;
    let clock = MonotonicClock::new();
    let mut service = service.with_refresh_interval(config.refresh_interval()?);

    service.start(clock.now());
    let snapshot = service.refresh_now(clock.now());
    service.stop();

    out.write_all(output.render(&snapshot)?.as_bytes())?;
    out.flush()?;
    Ok(())
}
