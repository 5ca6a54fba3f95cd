// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Policy command: print the effective policy without running checks.

use repo_preflight::cli::PolicyCommandArgs;
use repo_preflight::error::ExitCode;
use repo_preflight::output::markdown;
use repo_preflight::preflight;
use repo_preflight::registry::CheckRegistry;

pub fn run(args: &PolicyCommandArgs) -> anyhow::Result<ExitCode> {
    let registry = CheckRegistry::builtin();
    let resolved = preflight::resolve_policy(&registry, &args.path, &args.policy)?;

    print!(
        "{}",
        markdown::policy_document(&registry, &resolved.policy, resolved.config_path.as_deref())
    );
    Ok(ExitCode::Success)
}
