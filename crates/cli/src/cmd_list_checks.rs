// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List-checks command.

use repo_preflight::cli::ListChecksArgs;
use repo_preflight::error::ExitCode;
use repo_preflight::registry::CheckRegistry;

pub fn run(args: &ListChecksArgs) -> anyhow::Result<ExitCode> {
    let registry = CheckRegistry::builtin();

    if args.json {
        let defs: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&defs)?);
        return Ok(ExitCode::Success);
    }

    let width = registry.iter().map(|d| d.id.len()).max().unwrap_or(0);
    for def in registry.iter() {
        let groups: Vec<_> = def.groups.iter().map(|g| g.as_str()).collect();
        println!(
            "{:<width$}  {:<4}  {}",
            def.id,
            def.default_severity.as_str(),
            groups.join(",")
        );
    }
    Ok(ExitCode::Success)
}
