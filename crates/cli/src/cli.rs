// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::env::names;
use crate::output::OutputFormat;
use crate::policy::{CliOverrides, DiffMode, LayerOrigin, PolicyLayer, ThresholdOverrides};
use crate::registry::CheckGroup;

/// Repository publish-readiness and diff-aware hygiene checks
#[derive(Parser)]
#[command(name = "repo-preflight")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run repository checks
    Check(CheckArgs),
    /// List every registered check
    ListChecks(ListChecksArgs),
    /// Print the effective policy as Markdown
    Policy(PolicyCommandArgs),
    /// Write a .repo-preflight.toml template
    Init(InitArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Repository to check
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

impl CheckArgs {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

#[derive(Args)]
pub struct ListChecksArgs {
    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PolicyCommandArgs {
    /// Repository whose config is resolved
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to write the config into
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Seed the template from a rule pack
    #[arg(long, value_name = "NAME")]
    pub rule_pack: Option<String>,

    /// Seed the template from a profile
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Flags that feed the command-line policy layer.
#[derive(Args, Default)]
pub struct PolicyArgs {
    /// Run-context profile: quick, full, ci
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Repository archetype: oss-library, internal-service, cli-tool
    #[arg(long, value_name = "NAME")]
    pub rule_pack: Option<String>,

    /// Only run checks in this group (repeatable)
    #[arg(long = "check-group", value_enum, value_name = "GROUP")]
    pub check_groups: Vec<CheckGroup>,

    /// Treat warnings as failures
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,

    /// Do not treat warnings as failures
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,

    /// Run the gitleaks secret scan
    #[arg(long, overrides_with = "no_gitleaks")]
    pub gitleaks: bool,

    /// Skip the gitleaks secret scan
    #[arg(long, overrides_with = "gitleaks")]
    pub no_gitleaks: bool,

    /// Size limit for tracked files, in KiB
    #[arg(long, value_name = "KIB")]
    pub max_tracked_file_kib: Option<u64>,

    /// Size limit for blobs in history, in KiB
    #[arg(long, value_name = "KIB")]
    pub max_history_blob_kib: Option<u64>,

    /// Distinct blobs inspected by the history scan
    #[arg(long, value_name = "N")]
    pub history_object_limit: Option<u64>,

    /// Changed-file limit for the diff
    #[arg(long, value_name = "N")]
    pub max_diff_files: Option<u64>,

    /// Changed-line limit for the diff
    #[arg(long, value_name = "N")]
    pub max_diff_changed_lines: Option<u64>,

    /// Per-path growth limit for the diff, in KiB
    #[arg(long, value_name = "KIB")]
    pub max_diff_object_kib: Option<u64>,

    /// How the diff range is chosen
    #[arg(long, value_enum, value_name = "MODE")]
    pub diff_mode: Option<DiffMode>,

    /// Base ref used in pr mode when CI provides none
    #[arg(long, value_name = "REF")]
    pub pr_base_ref: Option<String>,

    /// Diff base ref (manual mode)
    #[arg(long, value_name = "REF")]
    pub diff_base: Option<String>,

    /// Diff target ref (manual mode; overrides the head in pr mode)
    #[arg(long, value_name = "REF")]
    pub diff_target: Option<String>,

    /// Use specific config file
    #[arg(short = 'C', long = "config", value_name = "FILE", env = names::REPO_PREFLIGHT_CONFIG)]
    pub config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    pub no_config: bool,
}

/// Collapse a `--flag`/`--no-flag` pair; unset when neither was given.
fn tristate(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl PolicyArgs {
    /// Build resolver inputs; only flags actually given become overrides.
    pub fn to_overrides(&self) -> CliOverrides {
        let mut layer = PolicyLayer::new(LayerOrigin::Cli);
        layer.strict = tristate(self.strict, self.no_strict);
        layer.gitleaks = tristate(self.gitleaks, self.no_gitleaks);
        layer.thresholds = ThresholdOverrides {
            max_tracked_file_kib: self.max_tracked_file_kib,
            max_history_blob_kib: self.max_history_blob_kib,
            history_object_limit: self.history_object_limit,
            max_diff_files: self.max_diff_files,
            max_diff_changed_lines: self.max_diff_changed_lines,
            max_diff_object_kib: self.max_diff_object_kib,
        };
        layer.diff_mode = self.diff_mode;
        layer.pr_base_ref = self.pr_base_ref.clone();
        layer.diff_base = self.diff_base.clone();
        layer.diff_target = self.diff_target.clone();

        CliOverrides {
            profile: self.profile.clone(),
            rule_pack: self.rule_pack.clone(),
            check_groups: self.check_groups.clone(),
            layer,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
