// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `watch`: the ticking scheduler.
//!
//! ```text
//! tokio interval (TICK_PERIOD)
//!   |
//!   v
//! service.tick(clock.now())  ---- refresh? ----> subscriber prints snapshot
//!   ^  (block_in_place)                          (or only changed rows)
//!   |
//! CancellationToken  <-- Ctrl-C
//!   cancelled: begin_shutdown() --> refresh_now() --> stop()
//! ```

use std::io::Write;
use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::cli::watch::WatchArgs;
use crate::config::Config;
use crate::config::types::OutputFormat;
use crate::error::Result;
use crate::host::{EnvironmentReader, SystemReader, process};
use crate::service::{Clock, EnvironmentSnapshotService, MonotonicClock};
use crate::snapshot::EnvironmentSnapshot;

use super::output::Output;

/// Upper bound on the scheduler period; refreshes are at most this late.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Lower bound on the scheduler period, so a zero interval does not spin.
const MIN_TICK_PERIOD: Duration = Duration::from_millis(5);

/// Run the watch command against the real host until Ctrl-C or `--count`.
///
/// # Errors
///
/// Returns an error if the display settings or refresh interval are invalid.
pub async fn run_watch_command(args: &WatchArgs, config: &Config) -> Result<()> {
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("interrupt received, stopping watch");
                signal_token.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "failed to listen for Ctrl-C"),
        }
    });

    let refreshes = watch(
        SystemReader::new(),
        config,
        args.count,
        cancel,
        std::io::stdout(),
    )
    .await?;
    tracing::debug!(refreshes, "watch finished");
    Ok(())
}

/// Drives a service with `reader` until `count` refreshes or `cancel` fires.
///
/// The first refresh happens immediately. On cancellation the process-wide
/// shutdown flag is raised and one final snapshot is printed. Returns the
/// number of refreshes.
///
/// # Errors
///
/// Returns an error if the display settings or refresh interval are invalid.
pub async fn watch<R, W>(
    reader: R,
    config: &Config,
    count: Option<u64>,
    cancel: CancellationToken,
    out: W,
) -> Result<u64>
where
    R: EnvironmentReader,
    W: Write + Send + 'static,
{
    let output = Output::from_config(config)?;
    let interval = config.refresh_interval()?;
    let clock = MonotonicClock::new();

    let mut service = EnvironmentSnapshotService::new(reader).with_refresh_interval(interval);
    service.subscribe(printer(output, config.display.changes_only, out))?;
    service.start(clock.now());
    blocking(|| service.refresh_now(clock.now()));

    let mut ticker = tokio::time::interval(interval.clamp(MIN_TICK_PERIOD, TICK_PERIOD));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while count.is_none_or(|limit| service.refresh_count() < limit) {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                process::begin_shutdown();
                blocking(|| service.refresh_now(clock.now()));
                break;
            }
            _ = ticker.tick() => {
                blocking(|| service.tick(clock.now()));
            }
        }
    }

    let refreshes = service.refresh_count();
    service.stop();
    Ok(refreshes)
}

/// Runs a refresh without stalling other tasks on this worker.
///
/// A refresh resolves a backtrace and lists disks. On a multi-thread runtime
/// the worker is handed over with `block_in_place`; a current-thread runtime
/// has no other worker, so the work runs inline.
fn blocking<T>(refresh: impl FnOnce() -> T) -> T {
    match Handle::try_current().map(|handle| handle.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(refresh),
        _ => refresh(),
    }
}

/// Subscriber writing each published snapshot to `out`.
fn printer<W>(
    output: Output,
    changes_only: bool,
    mut out: W,
) -> impl FnMut(&EnvironmentSnapshot) + Send + 'static
where
    W: Write + Send + 'static,
{
    let mut previous: Option<EnvironmentSnapshot> = None;
    let mut refresh = 0u64;

    move |snapshot: &EnvironmentSnapshot| {
        refresh += 1;
        let rendered = match (&previous, changes_only) {
            (Some(previous), true) => output.render_changes(snapshot, previous),
            _ => output.render(snapshot).map(Some),
        };

        let written = match rendered {
            Ok(Some(text)) => write_refresh(&mut out, &output, refresh, &text),
            Ok(None) => Ok(()),
            Err(e) => {
                tracing::warn!(refresh, error = %e, "failed to render snapshot");
                Ok(())
            }
        };
        if let Err(e) = written {
            tracing::warn!(refresh, error = %e, "failed to write snapshot");
        }
        if changes_only {
            previous = Some(snapshot.clone());
        }
    }
}

fn write_refresh<W: Write>(
    out: &mut W,
    output: &Output,
    refresh: u64,
    text: &str,
) -> std::io::Result<()> {
    match output.format() {
        OutputFormat::Text => {
            writeln!(out, "# refresh {refresh}")?;
            out.write_all(text.as_bytes())?;
            writeln!(out)?;
        }
        OutputFormat::Json => out.write_all(text.as_bytes())?,
    }
    out.flush()
}
