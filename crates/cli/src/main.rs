// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! repo-preflight CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use repo_preflight::cli::{Cli, Command};
use repo_preflight::env::names;
use repo_preflight::error::ExitCode;

mod cmd_check;
mod cmd_list_checks;
mod cmd_policy;

fn init_logging() {
    let filter = EnvFilter::try_from_env(names::REPO_PREFLIGHT_LOG)
        .unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("repo-preflight: {}", e);
            match e.downcast_ref::<repo_preflight::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code.code());
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are "errors" that exit cleanly
            let clean = !err.use_stderr();
            err.print()?;
            return Ok(if clean {
                ExitCode::Success
            } else {
                ExitCode::ConfigError
            });
        }
    };

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Check(args)) => cmd_check::run(args),
        Some(Command::ListChecks(args)) => cmd_list_checks::run(args),
        Some(Command::Policy(args)) => cmd_policy::run(args),
        Some(Command::Init(args)) => repo_preflight::cmd_init::run(args),
    }
}
