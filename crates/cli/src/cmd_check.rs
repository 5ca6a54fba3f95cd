// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::time::Instant;

use termcolor::StandardStream;

use repo_preflight::cli::CheckArgs;
use repo_preflight::color::resolve_color;
use repo_preflight::env::Env;
use repo_preflight::error::ExitCode;
use repo_preflight::output::{self, OutputFormat, Report};
use repo_preflight::preflight;
use repo_preflight::registry::CheckRegistry;

/// Run the check command.
pub fn run(args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let registry = CheckRegistry::builtin();
    let root = &args.path;

    let resolved = preflight::resolve_policy(&registry, root, &args.policy)?;
    let run = preflight::run(&registry, root, &resolved.policy, &Env::capture())?;
    tracing::debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        exit_code = run.exit_code.code(),
        "check finished"
    );

    let format = args.format();
    let choice = match format {
        OutputFormat::Text | OutputFormat::Compact => resolve_color(),
        _ => termcolor::ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(choice);

    let report = Report {
        path: root,
        config_path: resolved.config_path.as_deref(),
        registry: &registry,
        policy: &resolved.policy,
        diff: run.diff.refs(),
        results: &run.results,
        summary: run.summary,
        exit_code: run.exit_code,
    };
    output::write_report(&mut stdout, format, &report)?;

    Ok(run.exit_code)
}
