// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::Report;
use crate::aggregate::Summary;
use crate::check::CheckResult;
use crate::diff::DiffRefs;
use crate::error::{Error, ExitCode, Result};
use crate::policy::{DiffMode, Profile, RulePack};
use crate::severity::Severity;

/// Top-level JSON document for `check -o json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub path: &'a Path,
    pub profile: Profile,
    pub rule_pack: Option<RulePack>,
    pub strict: bool,
    pub gitleaks: bool,
    pub config_path: Option<&'a Path>,
    pub max_tracked_file_kib: u64,
    pub max_history_blob_kib: u64,
    pub history_object_limit: u64,
    pub max_diff_files: u64,
    pub max_diff_changed_lines: u64,
    pub max_diff_object_kib: u64,
    pub diff_mode: DiffMode,
    pub pr_base_ref: Option<&'a str>,
    pub diff_base: Option<&'a str>,
    pub diff_target: Option<&'a str>,
    /// Resolved range, `null` when diff checks were skipped.
    pub diff: Option<&'a DiffRefs>,
    pub severity_overrides: &'a BTreeMap<String, Severity>,
    pub check_ids: &'a [String],
    pub summary: Summary,
    pub exit_code: ExitCode,
    pub results: &'a [CheckResult],
}

impl<'a> From<&'a Report<'a>> for JsonReport<'a> {
    fn from(report: &'a Report<'a>) -> Self {
        let policy = report.policy;
        let t = &policy.thresholds;
        Self {
            path: report.path,
            profile: policy.profile,
            rule_pack: policy.rule_pack,
            strict: policy.strict,
            gitleaks: policy.gitleaks,
            config_path: report.config_path,
            max_tracked_file_kib: t.max_tracked_file_kib,
            max_history_blob_kib: t.max_history_blob_kib,
            history_object_limit: t.history_object_limit,
            max_diff_files: t.max_diff_files,
            max_diff_changed_lines: t.max_diff_changed_lines,
            max_diff_object_kib: t.max_diff_object_kib,
            diff_mode: policy.diff_mode,
            pr_base_ref: policy.pr_base_ref.as_deref(),
            diff_base: policy.diff_base.as_deref(),
            diff_target: policy.diff_target.as_deref(),
            diff: report.diff,
            severity_overrides: &policy.severity_overrides,
            check_ids: &policy.enabled_check_ids,
            summary: report.summary,
            exit_code: report.exit_code,
            results: report.results,
        }
    }
}

/// Render the report as pretty-printed JSON.
pub fn render(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(report))
        .map_err(|e| Error::Internal(format!("failed to serialize JSON report: {e}")))
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
