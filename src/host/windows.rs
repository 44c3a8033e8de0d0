// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Win32 probes.

use windows::Win32::System::SystemInformation::{
    GetSystemDirectoryW, GetSystemInfo, GetTickCount64, SYSTEM_INFO,
};

use crate::error::{HostQueryError, HostResult};

const MAX_PATH: usize = 260;

pub(super) fn system_directory() -> HostResult<String> {
    let mut buffer = vec![0u16; MAX_PATH];

    // SAFETY: The buffer is a valid writable slice; the API never writes past its length.
    let mut len = unsafe { GetSystemDirectoryW(Some(&mut buffer)) } as usize;

    // A return larger than the buffer is the required size, terminator included.
    if len > buffer.len() {
        buffer.resize(len, 0);
        // SAFETY: Same as above, with the resized buffer.
        len = unsafe { GetSystemDirectoryW(Some(&mut buffer)) } as usize;
    }

    if len == 0 || len > buffer.len() {
        return Err(HostQueryError::Io {
            field: "system_directory",
            source: std::io::Error::last_os_error(),
        });
    }

    Ok(String::from_utf16_lossy(&buffer[..len]))
}

pub(super) fn system_page_size() -> HostResult<u64> {
    let mut info = SYSTEM_INFO::default();

    // SAFETY: GetSystemInfo only writes into the provided, properly sized struct.
    unsafe { GetSystemInfo(&mut info) };

    if info.dwPageSize == 0 {
        return Err(HostQueryError::unavailable(
            "system_page_size",
            "GetSystemInfo reported a zero page size",
        ));
    }
    Ok(u64::from(info.dwPageSize))
}

pub(super) fn boot_millis() -> HostResult<u64> {
    // SAFETY: GetTickCount64 takes no arguments and cannot fail.
    Ok(unsafe { GetTickCount64() })
}

pub(super) fn is_64bit_operating_system() -> HostResult<bool> {
    // A 32-bit process under WOW64 sees the native architecture here.
    if std::env::var_os("PROCESSOR_ARCHITEW6432").is_some() {
        return Ok(true);
    }
    std::env::var("PROCESSOR_ARCHITECTURE")
        .map(|arch| arch.contains("64"))
        .map_err(|_| {
            HostQueryError::unavailable("is_64bit_operating_system", "PROCESSOR_ARCHITECTURE unset")
        })
}
