// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for host queries.

use std::collections::BTreeMap;
use std::ffi::OsString;

use super::system::unique_in_order;
use super::{EnvironmentReader, SystemReader, capture, join_command_line, process, vars};
use crate::error::{HostQueryError, HostResult};

/// Reader with fixed answers; selected probes fail.
struct ScriptedReader {
    failing: &'static [&'static str],
    observations: usize,
}

impl ScriptedReader {
    const fn failing(failing: &'static [&'static str]) -> Self {
        Self {
            failing,
            observations: 0,
        }
    }

    fn answer<T>(&self, field: &'static str, value: T) -> HostResult<T> {
        if self.failing.contains(&field) {
            Err(HostQueryError::unavailable(field, "scripted failure"))
        } else {
            Ok(value)
        }
    }
}

impl EnvironmentReader for ScriptedReader {
    fn begin_observation(&mut self) -> HostResult<()> {
        self.observations += 1;
        Ok(())
    }

    fn exit_code(&self) -> HostResult<i32> {
        self.answer("exit_code", 3)
    }
    fn is_64bit_process(&self) -> HostResult<bool> {
        self.answer("is_64bit_process", true)
    }
    fn current_managed_thread_id(&self) -> HostResult<u64> {
        self.answer("current_managed_thread_id", 7)
    }
    fn current_directory(&self) -> HostResult<String> {
        self.answer("current_directory", "/work".to_string())
    }
    fn machine_name(&self) -> HostResult<String> {
        self.answer("machine_name", "rig".to_string())
    }
    fn new_line(&self) -> HostResult<String> {
        self.answer("new_line", "\n".to_string())
    }
    fn os_version(&self) -> HostResult<String> {
        self.answer("os_version", "TestOS 1.0".to_string())
    }
    fn processor_count(&self) -> HostResult<usize> {
        self.answer("processor_count", 4)
    }
    fn stack_trace(&self) -> HostResult<String> {
        self.answer("stack_trace", "frame".to_string())
    }
    fn system_directory(&self) -> HostResult<String> {
        self.answer("system_directory", "/sys".to_string())
    }
    fn system_page_size(&self) -> HostResult<u64> {
        self.answer("system_page_size", 4096)
    }
    fn tick_count(&self) -> HostResult<u32> {
        self.answer("tick_count", 42)
    }
    fn user_domain_name(&self) -> HostResult<String> {
        self.answer("user_domain_name", "rig".to_string())
    }
    fn user_interactive(&self) -> HostResult<bool> {
        self.answer("user_interactive", false)
    }
    fn user_name(&self) -> HostResult<String> {
        self.answer("user_name", "tester".to_string())
    }
    fn version(&self) -> HostResult<String> {
        self.answer("version", "9.9.9".to_string())
    }
    fn working_set_bytes(&self) -> HostResult<u64> {
        self.answer("working_set_bytes", 1 << 20)
    }
    fn has_shutdown_started(&self) -> HostResult<bool> {
        self.answer("has_shutdown_started", false)
    }
    fn is_64bit_operating_system(&self) -> HostResult<bool> {
        self.answer("is_64bit_operating_system", true)
    }
    fn command_line_args(&self) -> HostResult<Vec<String>> {
        self.answer(
            "command_line_args",
            vec!["tool".to_string(), "two words".to_string()],
        )
    }
    fn environment_variables(&self) -> HostResult<BTreeMap<String, String>> {
        self.answer(
            "environment_variables",
            BTreeMap::from([("A".to_string(), "1".to_string())]),
        )
    }
    fn logical_drives(&self) -> HostResult<Vec<String>> {
        self.answer("logical_drives", vec!["/".to_string()])
    }
}

#[test]
fn test_capture_all_fields() {
    let mut reader = ScriptedReader::failing(&[]);
    let snapshot = capture(&mut reader);

    assert_eq!(reader.observations, 1);
    assert_eq!(snapshot.exit_code, 3);
    assert_eq!(snapshot.current_directory, "/work");
    assert_eq!(snapshot.command_line, "tool \"two words\"");
    assert_eq!(snapshot.processor_count, 4);
    assert_eq!(snapshot.stack_trace, "frame");
    assert_eq!(snapshot.environment_variables.len(), 1);
}

#[test]
fn test_capture_failed_stack_trace_degrades_to_empty() {
    let mut reader = ScriptedReader::failing(&["stack_trace"]);
    let snapshot = capture(&mut reader);

    assert_eq!(snapshot.stack_trace, "");
    assert_eq!(snapshot.machine_name, "rig");
    assert_eq!(snapshot.user_name, "tester");
    assert_eq!(snapshot.logical_drives, vec!["/".to_string()]);
    assert_eq!(snapshot.working_set_bytes, 1 << 20);
}

#[test]
fn test_capture_failures_use_field_defaults() {
    let mut reader = ScriptedReader::failing(&[
        "processor_count",
        "command_line_args",
        "environment_variables",
        "logical_drives",
        "system_page_size",
    ]);
    let snapshot = capture(&mut reader);

    assert_eq!(snapshot.processor_count, 1);
    assert!(snapshot.command_line_args.is_empty());
    // command_line derives from the failing args probe
    assert_eq!(snapshot.command_line, "");
    assert!(snapshot.environment_variables.is_empty());
    assert!(snapshot.logical_drives.is_empty());
    assert_eq!(snapshot.system_page_size, 0);
    assert_eq!(snapshot.os_version, "TestOS 1.0");
}

#[test]
fn test_join_command_line_quoting() {
    insta::assert_snapshot!(
        join_command_line(&["envsnap", "show", "--group", "my group", "", "say \"hi\""]),
        @r#"envsnap show --group "my group" "" "say \"hi\"""#
    );
    assert_eq!(join_command_line::<&str>(&[]), "");
}

#[test]
fn test_collect_vars_case_sensitive() {
    let raw = vec![
        (OsString::from("Path"), OsString::from("a")),
        (OsString::from("PATH"), OsString::from("b")),
    ];
    let map = vars::collect_vars(raw, false);
    assert_eq!(map.len(), 2);
    assert_eq!(map["Path"], "a");
    assert_eq!(map["PATH"], "b");
}

#[test]
fn test_collect_vars_case_insensitive_first_wins() {
    let raw = vec![
        (OsString::from("Path"), OsString::from("a")),
        (OsString::from("PATH"), OsString::from("b")),
        (OsString::from("HOME"), OsString::from("/h")),
    ];
    let map = vars::collect_vars(raw, true);
    assert_eq!(
        map,
        BTreeMap::from([
            ("HOME".to_string(), "/h".to_string()),
            ("Path".to_string(), "a".to_string()),
        ])
    );
}

#[test]
fn test_managed_thread_id_stable_per_thread() {
    let main_id = process::managed_thread_id();
    assert_eq!(main_id, process::managed_thread_id());

    let other_id = std::thread::spawn(process::managed_thread_id)
        .join()
        .unwrap();
    assert_ne!(main_id, other_id);
}

#[test]
fn test_system_page_size_is_power_of_two() {
    let size = SystemReader::new().system_page_size().unwrap();
    assert!(size > 0);
    assert!(size.is_power_of_two(), "page size {size}");
}

#[test]
fn test_tick_count_has_millisecond_resolution() {
    let reader = SystemReader::new();
    let first = reader.tick_count().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(30));
    let second = reader.tick_count().unwrap();

    let elapsed = second.wrapping_sub(first);
    assert!((30..1000).contains(&elapsed), "elapsed {elapsed} ms");
}

#[test]
fn test_unique_in_order_drops_non_adjacent_repeats() {
    let mounts = ["/", "/boot", "/", "/home", "/boot"].map(String::from);
    assert_eq!(unique_in_order(mounts), ["/", "/boot", "/home"]);
}

#[test]
fn test_system_reader_invariants() {
    let mut reader = SystemReader::new();
    let snapshot = capture(&mut reader);

    assert!(snapshot.processor_count >= 1);
    assert_eq!(snapshot.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(snapshot.is_64bit_process, cfg!(target_pointer_width = "64"));
    assert_eq!(
        snapshot.current_managed_thread_id,
        process::managed_thread_id()
    );
    assert!(!snapshot.command_line_args.is_empty());
    assert!(!snapshot.current_directory.is_empty());
    if snapshot.is_64bit_process {
        assert!(snapshot.is_64bit_operating_system);
    }
}
