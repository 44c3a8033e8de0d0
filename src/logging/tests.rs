// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    let err = LogLevel::new(7).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
}

#[test]
fn test_log_level_tracing_mapping() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::INFO.to_tracing_level(), Some(Level::INFO));
    assert_eq!(LogLevel::DUMP.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_level_filter_scopes_crate() {
    insta::assert_snapshot!(LogLevel::DEBUG.to_filter_string(), @"warn,envsnap=debug");
    insta::assert_snapshot!(LogLevel::DUMP.to_filter_string(), @"trace");
    insta::assert_snapshot!(LogLevel::SILENT.to_filter_string(), @"off");
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&LogLevel::TRACE).unwrap(), "5");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_empty_file_is_none() {
    let config = LogConfig::builder()
        .with_log_file(String::new())
        .build();
    assert_eq!(config.log_file(), None);

    let config = LogConfig::builder()
        .with_log_file("logs/envsnap.log".to_string())
        .build();
    assert_eq!(config.log_file(), Some("logs/envsnap.log"));
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(!config.show_target());
}
