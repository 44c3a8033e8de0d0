// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::io::Write;
use std::time::Duration;

use envsnap::config::Config;
use envsnap::config::loader::ConfigLoader;
use envsnap::config::types::OutputFormat;
use envsnap::snapshot::FieldGroup;
use tempfile::NamedTempFile;

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{content}").expect("failed to write temp file");
    file
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.refresh_interval().unwrap(), Duration::from_secs(1));
    assert_eq!(config.field_groups().unwrap(), FieldGroup::all());
}

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 2
file_log_level = 6
log_file = "/var/log/envsnap.log"

[service]
refresh_interval = 2.5

[display]
format = "json"
changes_only = true
groups = ["machine", "drives"]
redact = ["*TOKEN*", "AWS_*"]
"#;
    let config = Config::parse(toml).unwrap();

    insta::assert_json_snapshot!(config, @r#"
    {
      "global": {
        "output_log_level": 2,
        "file_log_level": 6,
        "log_file": "/var/log/envsnap.log"
      },
      "service": {
        "refresh_interval": 2.5
      },
      "display": {
        "format": "json",
        "changes_only": true,
        "groups": [
          "machine",
          "drives"
        ],
        "redact": [
          "*TOKEN*",
          "AWS_*"
        ]
      }
    }
    "#);
}

#[test]
fn config_parse_rejects_bad_values() {
    for toml in [
        "[service]\nrefresh_interval = -0.5",
        "[service]\nrefresh_interval = nan",
        "[service]\nrefresh_interval = inf",
        "[display]\nformat = \"xml\"",
        "[display]\ngroups = [\"kernel\"]",
        "[global]\noutput_log_level = 12",
        "[unknown]\nkey = 1",
    ] {
        assert!(Config::parse(toml).is_err(), "accepted: {toml}");
    }
}

// =============================================================================
// Layered files
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let base = toml_file(
        r#"
[service]
refresh_interval = 10.0

[display]
format = "json"
groups = ["process"]
"#,
    );
    let local = toml_file(
        r#"
[display]
groups = ["user", "runtime"]
"#,
    );

    let loader = ConfigLoader::new()
        .add_toml_file(base.path())
        .add_toml_file(local.path());
    let listed = loader.format_loaded_files();
    let config = loader.build().unwrap();

    assert_eq!(config.refresh_interval().unwrap(), Duration::from_secs(10));
    assert_eq!(config.display.format, OutputFormat::Json);
    assert_eq!(
        config.field_groups().unwrap(),
        FieldGroup::USER | FieldGroup::RUNTIME
    );
    assert_eq!(listed.len(), 2);
    assert!(listed[0].starts_with("1. [file] "));
    assert!(listed[1].starts_with("2. [file] "));
}

#[test]
fn config_optional_file_missing_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("envsnap.toml");

    let loader = ConfigLoader::new().add_toml_file_optional(&missing);
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn config_optional_file_present_is_tracked() {
    let file = toml_file("[display]\nchanges_only = true\n");

    let loader = ConfigLoader::new().add_toml_file_optional(file.path());
    assert_eq!(loader.loaded_files().len(), 1);
    assert!(loader.build().unwrap().display.changes_only);
}

#[test]
fn config_from_file_reports_invalid_interval() {
    let file = toml_file("[service]\nrefresh_interval = -3.0\n");

    let err = Config::from_file(file.path()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("refresh_interval"), "{message}");
}
