// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)         cmd (handlers)
//!                |           show / watch / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |          service          |
//!              |  tick / refresh / publish |
//!              '------+-------------+------'
//!                     |             |
//!                     v             v
//!                   host         snapshot
//!            EnvironmentReader   record, groups,
//!            sysinfo + platform  redaction, render
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod service;
pub mod snapshot;
