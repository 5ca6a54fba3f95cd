// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown renderers: the `check` results table and the `policy` document.

use std::fmt::Write;
use std::path::Path;

use super::Report;
use crate::policy::EffectivePolicy;
use crate::registry::{CheckGroup, CheckRegistry};

/// Escape characters that would break a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("none")
}

fn join_groups(groups: &[CheckGroup]) -> String {
    groups
        .iter()
        .map(|g| g.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Results of one run as a Markdown table.
pub fn results_table(report: &Report) -> String {
    let mut out = String::new();
    let summary = report.summary;

    writeln!(out, "## repo-preflight: {}\n", report.verdict().label()).ok();
    writeln!(out, "| Status | Count |").ok();
    writeln!(out, "|--------|------:|").ok();
    writeln!(out, "| fail | {} |", summary.fail).ok();
    writeln!(out, "| warn | {} |", summary.warn).ok();
    writeln!(out, "| pass | {} |", summary.pass).ok();
    writeln!(out).ok();

    writeln!(out, "| Check | Status | Message | Fix |").ok();
    writeln!(out, "|-------|--------|---------|-----|").ok();
    for result in report.results {
        writeln!(
            out,
            "| `{}` | {} | {} | {} |",
            result.id,
            result.status.label(),
            cell(&result.message),
            result.fix.as_deref().map(cell).unwrap_or_default()
        )
        .ok();
    }
    writeln!(out).ok();
    writeln!(out, "Exit code: `{}`", report.exit_code.code()).ok();
    out
}

/// The effective policy as a Markdown document.
pub fn policy_document(
    registry: &CheckRegistry,
    policy: &EffectivePolicy,
    config_path: Option<&Path>,
) -> String {
    let mut out = String::new();
    let t = &policy.thresholds;
    let config = config_path.map(|p| p.display().to_string());

    writeln!(out, "# repo-preflight policy\n").ok();
    writeln!(out, "- Profile: `{}`", policy.profile).ok();
    writeln!(
        out,
        "- Rule pack: `{}`",
        policy.rule_pack.map(|p| p.as_str()).unwrap_or("none")
    )
    .ok();
    writeln!(out, "- Config: `{}`", or_none(config.as_deref())).ok();
    writeln!(out, "- Strict: `{}`", policy.strict).ok();
    writeln!(out, "- Gitleaks: `{}`", policy.gitleaks).ok();
    writeln!(out, "- Max tracked file KiB: `{}`", t.max_tracked_file_kib).ok();
    writeln!(out, "- Max history blob KiB: `{}`", t.max_history_blob_kib).ok();
    writeln!(out, "- History object limit: `{}`", t.history_object_limit).ok();
    writeln!(out, "- Max diff files: `{}`", t.max_diff_files).ok();
    writeln!(out, "- Max diff changed lines: `{}`", t.max_diff_changed_lines).ok();
    writeln!(out, "- Max diff object KiB: `{}`", t.max_diff_object_kib).ok();
    writeln!(out, "- Diff mode: `{}`", policy.diff_mode).ok();
    writeln!(out, "- PR base ref: `{}`", or_none(policy.pr_base_ref.as_deref())).ok();
    writeln!(out, "- Diff base: `{}`", or_none(policy.diff_base.as_deref())).ok();
    writeln!(out, "- Diff target: `{}`", or_none(policy.diff_target.as_deref())).ok();
    if policy.check_groups.is_empty() {
        writeln!(out, "- Check groups: `all`").ok();
    } else {
        writeln!(out, "- Check groups: `{}`", join_groups(&policy.check_groups)).ok();
    }

    writeln!(out, "\n## Enabled checks\n").ok();
    writeln!(out, "| Check | Groups | Severity | Description |").ok();
    writeln!(out, "|-------|--------|----------|-------------|").ok();
    for def in registry.iter().filter(|d| policy.is_enabled(d.id)) {
        writeln!(
            out,
            "| `{}` | {} | {} | {} |",
            def.id,
            join_groups(def.groups),
            policy.severity_for(def),
            cell(def.description)
        )
        .ok();
    }

    writeln!(out, "\n## Severity overrides\n").ok();
    if policy.severity_overrides.is_empty() {
        writeln!(out, "_none_").ok();
    }
    for (id, severity) in &policy.severity_overrides {
        writeln!(out, "- `{id}` -> `{severity}`").ok();
    }
    out
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
