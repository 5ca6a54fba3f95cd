// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Effective policy model and its resolution.
//!
//! A policy is resolved once per invocation by folding an ordered list of
//! [`PolicyLayer`]s (baseline, profile, rule pack, config file, CLI) and
//! is never mutated afterwards.

mod layer;
mod presets;
mod resolve;
pub mod template;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use layer::{LayerOrigin, PolicyLayer, ThresholdOverrides};
pub use presets::{Profile, RulePack};
pub use resolve::{CliOverrides, resolve};

use crate::registry::{CheckDefinition, CheckGroup};
use crate::severity::Severity;

/// Default per-file size limit for tracked and newly changed files.
pub const DEFAULT_MAX_TRACKED_FILE_KIB: u64 = 2048;
/// Default size limit for blobs anywhere in history.
pub const DEFAULT_MAX_HISTORY_BLOB_KIB: u64 = 4096;
/// Default number of distinct blobs inspected by the history scan.
pub const DEFAULT_HISTORY_OBJECT_LIMIT: u64 = 15000;
/// Default changed-file limit for a diff.
pub const DEFAULT_MAX_DIFF_FILES: u64 = 200;
/// Default changed-line limit for a diff.
pub const DEFAULT_MAX_DIFF_CHANGED_LINES: u64 = 4000;
/// Default per-path growth limit for a diff.
pub const DEFAULT_MAX_DIFF_OBJECT_KIB: u64 = 1024;

/// How the diff range is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Use `diff_base`/`diff_target` verbatim.
    #[default]
    Manual,
    /// Detect the pull request range from CI, then fall back.
    Pr,
}

impl DiffMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffMode::Manual => "manual",
            DiffMode::Pr => "pr",
        }
    }
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(DiffMode::Manual),
            "pr" => Ok(DiffMode::Pr),
            other => Err(format!(
                "unknown diff mode '{other}' (expected one of: manual, pr)"
            )),
        }
    }
}

/// Size and diff thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub max_tracked_file_kib: u64,
    pub max_history_blob_kib: u64,
    pub history_object_limit: u64,
    pub max_diff_files: u64,
    pub max_diff_changed_lines: u64,
    pub max_diff_object_kib: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_tracked_file_kib: DEFAULT_MAX_TRACKED_FILE_KIB,
            max_history_blob_kib: DEFAULT_MAX_HISTORY_BLOB_KIB,
            history_object_limit: DEFAULT_HISTORY_OBJECT_LIMIT,
            max_diff_files: DEFAULT_MAX_DIFF_FILES,
            max_diff_changed_lines: DEFAULT_MAX_DIFF_CHANGED_LINES,
            max_diff_object_kib: DEFAULT_MAX_DIFF_OBJECT_KIB,
        }
    }
}

/// The resolved policy for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectivePolicy {
    pub profile: Profile,
    pub rule_pack: Option<RulePack>,
    pub strict: bool,
    pub gitleaks: bool,
    /// Enabled ids in registry order.
    pub enabled_check_ids: Vec<String>,
    /// Explicit overrides only; checks without one use their default.
    pub severity_overrides: BTreeMap<String, Severity>,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    pub diff_mode: DiffMode,
    pub pr_base_ref: Option<String>,
    pub diff_base: Option<String>,
    pub diff_target: Option<String>,
    /// Groups requested with `--check-group`, sorted.
    pub check_groups: Vec<CheckGroup>,
}

impl EffectivePolicy {
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled_check_ids.iter().any(|e| e == id)
    }

    pub fn override_for(&self, id: &str) -> Option<Severity> {
        self.severity_overrides.get(id).copied()
    }

    /// Severity a finding of this check is reported at.
    pub fn severity_for(&self, def: &CheckDefinition) -> Severity {
        self.override_for(def.id).unwrap_or(def.default_severity)
    }

    /// Remap a check's raw status through the override layer.
    ///
    /// Raw `pass` is never remapped; findings take the override if any.
    pub fn remap(&self, id: &str, raw: Severity) -> Severity {
        match (raw, self.override_for(id)) {
            (Severity::Pass, _) => Severity::Pass,
            (_, Some(overridden)) => overridden,
            (raw, None) => raw,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
