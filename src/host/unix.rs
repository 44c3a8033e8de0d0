// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Unix probes through libc, plus procfs for the OS architecture.

use crate::error::{HostQueryError, HostResult};

#[cfg(any(target_os = "linux", target_os = "android"))]
const BOOT_CLOCK: libc::clockid_t = libc::CLOCK_BOOTTIME;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const BOOT_CLOCK: libc::clockid_t = libc::CLOCK_MONOTONIC;

pub(super) fn system_directory() -> HostResult<String> {
    Err(HostQueryError::unavailable(
        "system_directory",
        "no system directory on this platform",
    ))
}

pub(super) fn system_page_size() -> HostResult<u64> {
    // SAFETY: `sysconf` has no side effects and is thread-safe for this query.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    u64::try_from(size)
        .ok()
        .filter(|&size| size > 0)
        .ok_or_else(|| HostQueryError::Io {
            field: "system_page_size",
            source: std::io::Error::last_os_error(),
        })
}

/// Milliseconds on the boot clock (suspend time included where the OS
/// counts it).
pub(super) fn boot_millis() -> HostResult<u64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };

    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(BOOT_CLOCK, &mut ts) };
    if rc != 0 {
        return Err(HostQueryError::Io {
            field: "tick_count",
            source: std::io::Error::last_os_error(),
        });
    }

    let secs = u64::try_from(ts.tv_sec).unwrap_or_default();
    let millis = u64::try_from(ts.tv_nsec).unwrap_or_default() / 1_000_000;
    Ok(secs.saturating_mul(1000).saturating_add(millis))
}

pub(super) fn is_64bit_operating_system() -> HostResult<bool> {
    std::fs::read_to_string("/proc/sys/kernel/arch")
        .map(|arch| arch.trim().contains("64"))
        .map_err(|source| HostQueryError::Io {
            field: "is_64bit_operating_system",
            source,
        })
}
