// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Show | Watch
//! ```

use std::process::ExitCode;

use envsnap::cli::{self, Cli, Command};
use envsnap::cmd::config::{run_inis_command, run_options_command};
use envsnap::cmd::show::run_show_command;
use envsnap::cmd::watch::run_watch_command;
use envsnap::config::loader::ConfigLoader;
use envsnap::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use envsnap::host::process;
use envsnap::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli);

    let log_config = build_log_config(&cli, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

fn build_log_config(cli: &Cli, config: Option<&Config>) -> LogConfig {
    let configured = config.map(|c| &c.global);

    let console_level = cli
        .global
        .log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| configured.map(|g| g.output_log_level))
        .unwrap_or(LogLevel::INFO);

    let file_level = cli
        .global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| configured.map(|g| g.file_log_level))
        .unwrap_or(console_level);

    let log_file = cli
        .global
        .log_file
        .as_ref()
        .map(|p| p.display().to_string())
        .or_else(|| configured.map(|g| g.log_file.clone()));

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file)
        .build()
}

async fn dispatch_command(cli: &Cli, config: envsnap::error::Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            let loader = build_config_loader(cli);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Show(_)) => config.and_then(|config| run_show_command(&config)),
        Some(Command::Watch(args)) => match config {
            Ok(config) => run_watch_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => exit_code(process::exit_code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::set_exit_code(1);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !cli.global.no_default_config {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(cli: &Cli) -> envsnap::error::Result<Config> {
    let mut loader = build_config_loader(cli);
    for (key, value) in cli.config_overrides() {
        loader = loader.set(key, value)?;
    }
    loader.build().map_err(|e| e.context("failed to load config"))
}
