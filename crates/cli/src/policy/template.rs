// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `.repo-preflight.toml` template for `repo-preflight init`.

use std::fmt::Write;

use super::{PolicyLayer, Profile, RulePack, Thresholds};

/// Render a config file seeded from a profile and optional rule pack.
pub fn render(profile: Profile, rule_pack: Option<RulePack>) -> String {
    let mut layers = vec![PolicyLayer::baseline(), profile.layer()];
    layers.extend(rule_pack.map(RulePack::layer));
    let merged = layers
        .iter()
        .fold(PolicyLayer::default(), |acc, layer| acc.merged(layer));
    let t = merged.thresholds.or_defaults(Thresholds::default());

    let mut out = String::new();
    out.push_str("# repo-preflight configuration\n");
    out.push_str("# Generated by `repo-preflight init`. Command-line flags override these values.\n\n");

    out.push_str("[preflight]\n");
    let _ = writeln!(out, "profile = \"{profile}\"");
    match rule_pack {
        Some(pack) => {
            let _ = writeln!(out, "rule_pack = \"{pack}\"");
        }
        None => out.push_str("# rule_pack = \"oss-library\"\n"),
    }
    let _ = writeln!(out, "strict = {}", merged.strict.unwrap_or(false));
    let _ = writeln!(out, "gitleaks = {}", merged.gitleaks.unwrap_or(true));
    let _ = writeln!(
        out,
        "diff_mode = \"{}\"",
        merged.diff_mode.unwrap_or_default()
    );
    out.push_str("# pr_base_ref = \"origin/main\"\n");
    out.push_str("# diff_base = \"origin/main\"\n");
    out.push_str("# diff_target = \"HEAD\"\n");
    let _ = writeln!(out, "max_tracked_file_kib = {}", t.max_tracked_file_kib);
    let _ = writeln!(out, "max_history_blob_kib = {}", t.max_history_blob_kib);
    let _ = writeln!(out, "history_object_limit = {}", t.history_object_limit);
    let _ = writeln!(out, "max_diff_files = {}", t.max_diff_files);
    let _ = writeln!(out, "max_diff_changed_lines = {}", t.max_diff_changed_lines);
    let _ = writeln!(out, "max_diff_object_kib = {}", t.max_diff_object_kib);

    out.push_str("\n[checks]\n");
    out.push_str("include = []\n");
    out.push_str("exclude = []\n");

    out.push_str("\n[severity_overrides]\n");
    if merged.severity_overrides.is_empty() {
        out.push_str("# readme_present = \"fail\"\n");
    }
    for (id, severity) in &merged.severity_overrides {
        let _ = writeln!(out, "{id} = \"{severity}\"");
    }
    out
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
