// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use envsnap::cli::global::GlobalOptions;
use envsnap::cli::{Cli, Command};
use envsnap::config::Config;

fn override_keys(cli: &Cli) -> Vec<&'static str> {
    cli.config_overrides().into_iter().map(|(key, _)| key).collect()
}

fn build_with_overrides(cli: &Cli) -> Config {
    let mut loader = Config::builder();
    for (key, value) in cli.config_overrides() {
        loader = loader.set(key, value).unwrap();
    }
    loader.build().unwrap()
}

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["envsnap", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["envsnap", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["envsnap"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Show Command
// =============================================================================

#[test]
fn cli_show_defaults() {
    let cli = Cli::try_parse_from(["envsnap", "show"]).unwrap();
    let Some(Command::Show(args)) = &cli.command else {
        panic!("expected show command");
    };
    assert!(!args.json);
    assert!(args.groups.is_empty());
    assert!(!args.no_redact);
    assert!(override_keys(&cli).is_empty());
}

#[test]
fn cli_show_overrides_reach_config() {
    let cli = Cli::try_parse_from([
        "envsnap",
        "show",
        "--json",
        "--group",
        "machine",
        "--group",
        "user",
        "--no-redact",
    ])
    .unwrap();
    let config = build_with_overrides(&cli);

    assert_eq!(config.display.format.to_string(), "json");
    assert_eq!(config.display.groups, ["machine", "user"]);
    assert!(config.display.redact.is_empty());
    assert!(!config.redaction().unwrap().is_sensitive("API_TOKEN"));
}

#[test]
fn cli_show_unknown_group_fails_at_load() {
    let cli = Cli::try_parse_from(["envsnap", "show", "-g", "gpu"]).unwrap();
    let mut loader = Config::builder();
    for (key, value) in cli.config_overrides() {
        loader = loader.set(key, value).unwrap();
    }
    assert!(loader.build().is_err());
}

// =============================================================================
// Watch Command
// =============================================================================

#[test]
fn cli_watch_overrides_reach_config() {
    let cli = Cli::try_parse_from([
        "envsnap",
        "watch",
        "-i",
        "0.25",
        "--changes-only",
        "--count",
        "10",
    ])
    .unwrap();
    let config = build_with_overrides(&cli);

    assert_eq!(
        config.refresh_interval().unwrap(),
        std::time::Duration::from_millis(250)
    );
    assert!(config.display.changes_only);
    let Some(Command::Watch(args)) = &cli.command else {
        panic!("expected watch command");
    };
    assert_eq!(args.count, Some(10));
}

#[test]
fn cli_watch_negative_interval_fails_at_load() {
    let cli = Cli::try_parse_from(["envsnap", "watch", "--interval=-1"]).unwrap();
    let mut loader = Config::builder();
    for (key, value) in cli.config_overrides() {
        loader = loader.set(key, value).unwrap();
    }
    let err = loader.build().unwrap_err();
    assert!(err.to_string().contains("refresh_interval"), "{err}");
}

#[test]
fn cli_watch_non_numeric_interval_rejected() {
    assert!(Cli::try_parse_from(["envsnap", "watch", "--interval", "soon"]).is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_log_levels() {
    let cli =
        Cli::try_parse_from(["envsnap", "-l", "5", "--file-log-level", "3", "show"]).unwrap();
    let config = build_with_overrides(&cli);
    assert_eq!(config.global.output_log_level.as_u8(), 5);
    assert_eq!(config.global.file_log_level.as_u8(), 3);
}

#[test]
fn cli_global_options_multiple_configs() {
    let cli = Cli::try_parse_from([
        "envsnap",
        "-c",
        "base.toml",
        "--config",
        "override.toml",
        "show",
    ])
    .unwrap();
    insta::assert_debug_snapshot!(cli.global.configs, @r#"
    [
        "base.toml",
        "override.toml",
    ]
    "#);
}

#[test]
fn cli_global_options_to_config_overrides() {
    let opts = GlobalOptions {
        log_level: Some(4),
        log_file: Some(std::path::PathBuf::from("envsnap.log")),
        ..Default::default()
    };
    let keys: Vec<_> = opts
        .to_config_overrides()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    insta::assert_debug_snapshot!(keys, @r#"
    [
        "global.output_log_level=4",
        "global.file_log_level=4",
        "global.log_file=envsnap.log",
    ]
    "#);
}
