// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end pipeline shared by the `check` and `policy` commands.
//!
//! config discovery → policy resolution → diff preparation → checks →
//! aggregation.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::aggregate::{Summary, aggregate};
use crate::check::CheckResult;
use crate::checks;
use crate::cli::PolicyArgs;
use crate::config::{self, ConfigFile};
use crate::diff::{self, DiffState};
use crate::discovery;
use crate::env::Env;
use crate::error::{Error, ExitCode, Result};
use crate::git::Git2Query;
use crate::policy::{DiffMode, EffectivePolicy, resolve};
use crate::registry::CheckRegistry;
use crate::runner::CheckRunner;

/// Policy resolved for a repository path.
#[derive(Debug)]
pub struct Resolved {
    pub config_path: Option<PathBuf>,
    pub policy: EffectivePolicy,
}

/// Outcome of one `check` run.
#[derive(Debug)]
pub struct Run {
    pub diff: DiffState,
    pub results: Vec<CheckResult>,
    pub summary: Summary,
    pub exit_code: ExitCode,
}

/// Discover and load config, then resolve the policy.
pub fn resolve_policy(registry: &CheckRegistry, root: &Path, args: &PolicyArgs) -> Result<Resolved> {
    if !root.is_dir() {
        return Err(Error::Argument(format!(
            "path is not a directory: {}",
            root.display()
        )));
    }

    let config_path = discovery::resolve_config(args.config.as_deref(), args.no_config, root)?;
    let config = match &config_path {
        Some(path) => {
            debug!("loading config from {}", path.display());
            config::load(path)?
        }
        None => ConfigFile::default(),
    };

    let policy = resolve(registry, &args.to_overrides(), &config)?;
    Ok(Resolved {
        config_path,
        policy,
    })
}

/// Run every enabled check and aggregate the results.
pub fn run(registry: &CheckRegistry, root: &Path, policy: &EffectivePolicy, env: &Env) -> Result<Run> {
    let diff = prepare_diff(registry, root, policy, env)?;
    let checks = checks::enabled_checks(policy);
    debug!(checks = checks.len(), "running checks");

    let results = CheckRunner::new(registry, policy).run(checks, root, &diff);
    let (summary, exit_code) = aggregate(&results, policy.strict);
    Ok(Run {
        diff,
        results,
        summary,
        exit_code,
    })
}

/// Compute the diff snapshot once, only when a diff check is enabled.
fn prepare_diff(
    registry: &CheckRegistry,
    root: &Path,
    policy: &EffectivePolicy,
    env: &Env,
) -> Result<DiffState> {
    let needs_diff = registry
        .iter()
        .any(|def| def.requires_diff && policy.is_enabled(def.id));
    if !needs_diff {
        return Ok(DiffState::Skipped("no diff checks enabled".to_string()));
    }

    match Git2Query::discover(root) {
        Ok(git) => diff::prepare(&git, policy, env),
        Err(e) if explicit_refs(policy) => Err(e),
        Err(e) => {
            warn!(error = %e, "not a git repository, skipping diff checks");
            Ok(DiffState::Skipped("not a git repository".to_string()))
        }
    }
}

/// Manual mode with both refs given: failure to resolve them is fatal.
fn explicit_refs(policy: &EffectivePolicy) -> bool {
    policy.diff_mode == DiffMode::Manual && policy.diff_base.is_some() && policy.diff_target.is_some()
}

#[cfg(test)]
#[path = "preflight_tests.rs"]
mod tests;
