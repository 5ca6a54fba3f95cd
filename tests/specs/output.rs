//! Specs for output formats and colorization.

use crate::prelude::*;

/// Repository with one warning (no SECURITY.md) and one failure (no README).
fn mixed_project() -> Project {
    let project = Project::git();
    project.file("LICENSE", "SPDX-License-Identifier: MIT\n");
    project.commit("initial");
    project
}

/// > Default text output: headline, context lines, one line per result
#[test]
fn text_output() {
    let project = mixed_project();
    project
        .check()
        .args(&["--check-group", "docs"])
        .exits(2)
        .stdout_has("repo-preflight: FAIL (1 fail, 1 warn, 2 pass)\n")
        .stdout_has("profile: full\n")
        .stdout_has("rule pack: none\n")
        .stdout_has("mode: default\n")
        .stdout_has(
            "checks: readme_present, license_present, license_identifier, security_policy_present\n",
        )
        .stdout_has("- [FAIL] readme_present: README.md is missing\n")
        .stdout_has("- [PASS] license_present:")
        .stdout_has("- [WARN] security_policy_present: SECURITY.md is missing\n  fix: ");
}

/// > Piped output has no color by default
#[test]
fn no_color_when_piped() {
    let project = mixed_project();
    project
        .check()
        .args(&["--check-group", "docs"])
        .exits(2)
        .stdout_lacks("\x1b[");
}

/// > COLOR forces color; NO_COLOR wins over it
#[test]
fn color_env_vars() {
    let project = mixed_project();
    project
        .check()
        .args(&["--check-group", "docs"])
        .env("COLOR", "1")
        .exits(2)
        .stdout_has("\x1b[");

    project
        .check()
        .args(&["--check-group", "docs"])
        .env("COLOR", "1")
        .env("NO_COLOR", "1")
        .exits(2)
        .stdout_lacks("\x1b[");
}

/// > Compact output lists only findings plus a summary line
#[test]
fn compact_output() {
    let project = mixed_project();
    project
        .check()
        .args(&["--check-group", "docs", "-o", "compact"])
        .exits(2)
        .stdout_eq(
            "FAIL readme_present: README.md is missing\n\
             WARN security_policy_present: SECURITY.md is missing\n\
             FAIL 1 fail, 1 warn, 2 pass (exit 2)\n",
        );
}

/// > JSON carries the documented top-level fields
#[test]
fn json_shape() {
    let project = mixed_project();
    let report = project.check().args(&["--check-group", "docs"]).json(2);

    for key in [
        "path",
        "profile",
        "rule_pack",
        "strict",
        "gitleaks",
        "config_path",
        "max_tracked_file_kib",
        "max_history_blob_kib",
        "history_object_limit",
        "max_diff_files",
        "max_diff_changed_lines",
        "max_diff_object_kib",
        "diff_mode",
        "pr_base_ref",
        "diff_base",
        "diff_target",
        "severity_overrides",
        "check_ids",
        "summary",
        "exit_code",
        "results",
    ] {
        assert!(report.get(key).is_some(), "missing {key}");
    }
    assert_eq!(report["summary"], serde_json::json!({"pass": 2, "warn": 1, "fail": 1}));
    assert_eq!(report["exit_code"], 2);
    assert_eq!(report["results"][0]["id"], "readme_present");
    assert_eq!(report["results"][0]["fix"], "Add a README.md covering purpose, usage and examples.");
}

/// > SARIF 2.1.0 with one rule per enabled check and only non-pass results
#[test]
fn sarif_shape() {
    let project = mixed_project();
    let mut cmd = preflight_cmd();
    cmd.arg("check")
        .arg(project.path())
        .args(["--check-group", "docs", "-o", "sarif"]);
    let run = run_exits(cmd, 2);

    let log: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(log["version"], "2.1.0");
    let run = &log["runs"][0];
    assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 4);
    let results = run["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["ruleId"], "readme_present");
    assert_eq!(results[0]["level"], "error");
    assert_eq!(results[1]["level"], "warning");
    assert_eq!(run["properties"]["diff_mode"], "manual");
}

/// > Markdown output renders a results table
#[test]
fn markdown_output() {
    let project = mixed_project();
    project
        .check()
        .args(&["--check-group", "docs", "-o", "markdown"])
        .exits(2)
        .stdout_has("## repo-preflight: FAIL")
        .stdout_has("| `readme_present` | FAIL | README.md is missing |")
        .stdout_has("Exit code: `2`");
}

/// > The exit code is identical across output modes
#[test]
fn exit_code_is_format_independent() {
    let project = mixed_project();
    for format in ["text", "json", "sarif", "compact", "markdown"] {
        project
            .check()
            .args(&["--check-group", "docs", "--strict", "-o", format])
            .exits(2);
        project
            .check()
            .args(&["--check-group", "docs", "-o", format])
            .env("NO_COLOR", "1")
            .exits(2);
    }
}

/// > Strict turns a warnings-only run into exit 2
#[test]
fn strict_escalates_exit_code() {
    let project = Project::publishable();
    project.run_git(&["rm", "--quiet", "SECURITY.md"]);
    project.commit("drop security policy");

    project.check().args(&["--check-group", "docs"]).exits(1);
    project
        .check()
        .args(&["--check-group", "docs", "--strict"])
        .exits(2);
    project
        .check()
        .args(&["--check-group", "docs", "--profile", "ci", "--no-strict"])
        .exits(1);
}
