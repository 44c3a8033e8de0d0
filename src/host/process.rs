// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process-wide state reported in snapshots.
//!
//! ```text
//! exit code      set_exit_code() / exit_code()      main returns it
//! shutdown flag  begin_shutdown() / has_shutdown_started()
//! thread ids     managed_thread_id()  1, 2, 3 ... in first-use order
//! ```

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};

static EXIT_CODE: AtomicI32 = AtomicI32::new(0);
static SHUTDOWN_STARTED: AtomicBool = AtomicBool::new(false);
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Exit code the process will report when it ends normally.
#[must_use]
pub fn exit_code() -> i32 {
    EXIT_CODE.load(Ordering::Relaxed)
}

/// Sets the exit code reported by [`exit_code`].
pub fn set_exit_code(code: i32) {
    EXIT_CODE.store(code, Ordering::Relaxed);
}

/// Marks the process as shutting down. Irreversible.
pub fn begin_shutdown() {
    SHUTDOWN_STARTED.store(true, Ordering::Release);
}

/// Whether [`begin_shutdown`] has been called.
#[must_use]
pub fn has_shutdown_started() -> bool {
    SHUTDOWN_STARTED.load(Ordering::Acquire)
}

/// Small, stable id of the calling thread.
///
/// Ids are handed out on first use per thread and never reused.
#[must_use]
pub fn managed_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}
