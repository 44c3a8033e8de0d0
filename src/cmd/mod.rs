// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), show, watch
//!   output: shared text / JSON rendering
//! ```

pub mod config;
pub mod output;
pub mod show;
pub mod watch;
