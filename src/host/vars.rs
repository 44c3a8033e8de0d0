// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable capture.
//!
//! ```text
//! std::env::vars_os()  -->  lossy UTF-8  -->  BTreeMap<String, String>
//! Windows: keys fold case-insensitively (PATH == Path), first spelling wins
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ffi::OsString;

/// Whether variable names compare case-insensitively on this platform.
pub const CASE_INSENSITIVE_KEYS: bool = cfg!(windows);

/// Captures the current process environment.
#[must_use]
pub fn current_vars() -> BTreeMap<String, String> {
    collect_vars(std::env::vars_os(), CASE_INSENSITIVE_KEYS)
}

/// Collects raw variables into a map with unique keys.
///
/// Non-UTF-8 names and values are converted lossily. With
/// `case_insensitive`, later duplicates that differ only in ASCII case are
/// dropped.
pub fn collect_vars<I>(vars: I, case_insensitive: bool) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let lossy = vars.into_iter().map(|(k, v)| {
        (
            k.to_string_lossy().into_owned(),
            v.to_string_lossy().into_owned(),
        )
    });

    if !case_insensitive {
        return lossy.collect();
    }

    let mut folded: BTreeMap<String, (String, String)> = BTreeMap::new();
    for (key, value) in lossy {
        if let Entry::Vacant(slot) = folded.entry(key.to_ascii_lowercase()) {
            slot.insert((key, value));
        }
    }
    folded.into_values().collect()
}
