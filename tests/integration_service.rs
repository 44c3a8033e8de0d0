// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the snapshot service.
//!
//! Drives the service through its public API with a replayed reader and
//! with the real host.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use envsnap::host::FixedReader;
use envsnap::service::{Clock, EnvironmentSnapshotService, Lifecycle, ManualClock};
use envsnap::snapshot::EnvironmentSnapshot;

fn prepared() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        machine_name: "rig".to_string(),
        new_line: "\n".to_string(),
        command_line: "envsnap show".to_string(),
        command_line_args: vec!["envsnap".to_string(), "show".to_string()],
        environment_variables: BTreeMap::from([("HOME".to_string(), "/home/dev".to_string())]),
        logical_drives: vec!["/".to_string()],
        ..EnvironmentSnapshot::default()
    }
}

fn volatile_reader() -> FixedReader {
    FixedReader::new(prepared()).with_update(|snapshot, pass| {
        snapshot.tick_count = u32::try_from(pass * 1000).unwrap_or(u32::MAX);
        snapshot.working_set_bytes = pass * 4096;
        snapshot.stack_trace = format!("frame {pass}");
    })
}

// =============================================================================
// Scheduling
// =============================================================================

#[test]
fn service_refreshes_on_interval() {
    let clock = ManualClock::new();
    let mut service =
        EnvironmentSnapshotService::new(volatile_reader()).with_refresh_interval(Duration::from_secs(1));
    service.start(clock.now());

    clock.set(Duration::from_millis(500));
    assert!(!service.tick(clock.now()));
    assert!(service.snapshot().is_default());

    clock.set(Duration::from_millis(1100));
    assert!(service.tick(clock.now()));
    assert_eq!(service.last_refresh(), Duration::from_millis(1100));
    assert_eq!(service.snapshot().tick_count, 1000);

    clock.set(Duration::from_millis(1500));
    assert!(!service.tick(clock.now()));

    clock.set(Duration::from_millis(1600));
    service.refresh_now(clock.now());
    assert_eq!(service.snapshot().tick_count, 2000);
    assert_eq!(service.reader().observations(), 2);
}

#[test]
fn service_published_snapshot_shape() {
    let mut service = EnvironmentSnapshotService::new(volatile_reader());
    let snapshot = service.refresh();

    insta::assert_json_snapshot!(snapshot, {
        ".tick_count" => "[volatile]",
        ".working_set_bytes" => "[volatile]",
        ".stack_trace" => "[volatile]",
    }, @r#"
    {
      "exit_code": 0,
      "is_64bit_process": false,
      "current_managed_thread_id": 0,
      "current_directory": "",
      "command_line": "envsnap show",
      "machine_name": "rig",
      "new_line": "\n",
      "os_version": "",
      "processor_count": 1,
      "stack_trace": "[volatile]",
      "system_directory": "",
      "system_page_size": 0,
      "tick_count": "[volatile]",
      "user_domain_name": "",
      "user_interactive": false,
      "user_name": "",
      "version": "",
      "working_set_bytes": "[volatile]",
      "has_shutdown_started": false,
      "is_64bit_operating_system": false,
      "command_line_args": [
        "envsnap",
        "show"
      ],
      "environment_variables": {
        "HOME": "/home/dev"
      },
      "logical_drives": [
        "/"
      ]
    }
    "#);
}

#[test]
fn service_changed_fields_between_refreshes() {
    let mut service = EnvironmentSnapshotService::new(volatile_reader());
    let first = service.refresh();
    let second = service.refresh();

    assert_eq!(
        second.changed_fields(&first),
        vec!["stack_trace", "tick_count", "working_set_bytes"]
    );
}

// =============================================================================
// Readers and subscriptions
// =============================================================================

#[test]
fn service_handle_outlives_borrow_on_other_thread() {
    let mut service = EnvironmentSnapshotService::new(volatile_reader());
    let handle = service.handle();
    service.refresh();

    let seen = std::thread::spawn(move || handle.snapshot().tick_count)
        .join()
        .unwrap();
    assert_eq!(seen, 1000);
}

#[test]
fn service_subscription_lifecycle() {
    let mut service = EnvironmentSnapshotService::new(volatile_reader());
    service.start(Duration::ZERO);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    service
        .subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.tick_count))
        .unwrap();

    service.tick(Duration::from_secs(1));
    service.tick(Duration::from_secs(2));
    service.stop();
    service.stop();

    assert_eq!(service.state(), Lifecycle::Stopped);
    assert_eq!(service.subscription_count(), 0);
    assert_eq!(*seen.lock().unwrap(), vec![1000, 2000]);
}

// =============================================================================
// Real host
// =============================================================================

#[test]
fn service_for_host_snapshot_invariants() {
    let mut service = EnvironmentSnapshotService::for_host();
    let snapshot = service.refresh_now(Duration::ZERO);

    assert!(snapshot.processor_count >= 1);
    assert_eq!(snapshot.version, env!("CARGO_PKG_VERSION"));
    assert!(!snapshot.command_line_args.is_empty());
    assert_eq!(
        snapshot.current_directory,
        std::env::current_dir().unwrap().display().to_string()
    );
    assert_eq!(snapshot.new_line, if cfg!(windows) { "\r\n" } else { "\n" });
    assert!(!snapshot.has_shutdown_started);
    assert!(Arc::ptr_eq(&snapshot, &service.snapshot()));
}
