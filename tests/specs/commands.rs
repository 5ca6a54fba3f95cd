//! Specs for `list-checks`, `policy` and `init`.

use crate::prelude::*;

const CATALOG: &[&str] = &[
    "git_repository",
    "remote_origin",
    "clean_worktree",
    "default_branch_style",
    "readme_present",
    "license_present",
    "license_identifier",
    "security_policy_present",
    "gitignore_basics",
    "tracked_env_files",
    "tracked_keylike_files",
    "tracked_large_files",
    "history_large_blobs",
    "gitleaks_scan",
    "diff_changed_files",
    "diff_large_files",
    "diff_object_sizes",
    "diff_patch_size",
];

// =============================================================================
// LIST-CHECKS
// =============================================================================

/// > list-checks prints every id in registry order
#[test]
fn list_checks_prints_catalog_in_order() {
    let mut cmd = preflight_cmd();
    cmd.arg("list-checks");
    let run = run_exits(cmd, 0);

    let ids: Vec<String> = run
        .stdout()
        .lines()
        .map(|line| line.split_whitespace().next().unwrap().to_string())
        .collect();
    assert_eq!(ids, CATALOG);
}

/// > list-checks shows groups and default severity
#[test]
fn list_checks_shows_groups_and_severity() {
    let mut cmd = preflight_cmd();
    cmd.arg("list-checks");
    run_exits(cmd, 0)
        .stdout_has(predicates::str::is_match(r"(?m)^diff_large_files\s+warn\s+diff,size$").unwrap())
        .stdout_has(predicates::str::is_match(r"(?m)^readme_present\s+fail\s+docs$").unwrap());
}

/// > list-checks --json emits the registry
#[test]
fn list_checks_json() {
    let mut cmd = preflight_cmd();
    cmd.args(["list-checks", "--json"]);
    let run = run_exits(cmd, 0);

    let value: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    let defs = value.as_array().unwrap();
    assert_eq!(defs.len(), CATALOG.len());
    assert_eq!(defs[13]["id"], "gitleaks_scan");
    assert_eq!(defs[13]["groups"], serde_json::json!(["secrets"]));
    assert_eq!(defs[14]["requires_diff"], true);
}

// =============================================================================
// POLICY
// =============================================================================

/// > policy prints the effective policy as Markdown
#[test]
fn policy_document_reflects_flags() {
    let project = Project::empty();
    let mut cmd = preflight_cmd();
    cmd.arg("policy")
        .arg(project.path())
        .args(["--profile", "ci", "--rule-pack", "oss-library", "--max-diff-files", "50"]);

    run_exits(cmd, 0)
        .stdout_has("# repo-preflight policy")
        .stdout_has("- Profile: `ci`")
        .stdout_has("- Rule pack: `oss-library`")
        .stdout_has("- Strict: `true`")
        .stdout_has("- Max diff files: `50`")
        .stdout_has("- `license_present` -> `fail`");
}

/// > policy reads the config file in the path
#[test]
fn policy_reads_config() {
    let project = Project::empty();
    project.file(
        ".repo-preflight.toml",
        "[preflight]\nprofile = \"quick\"\n\n[severity_overrides]\nreadme_present = \"warn\"\n",
    );
    let mut cmd = preflight_cmd();
    cmd.arg("policy").arg(project.path());

    run_exits(cmd, 0)
        .stdout_has("- Profile: `quick`")
        .stdout_has("- Gitleaks: `false`")
        .stdout_has("- `readme_present` -> `warn`")
        .stdout_lacks("`gitleaks_scan`");
}

/// > policy with a bad profile is a config error
#[test]
fn policy_rejects_unknown_profile() {
    let project = Project::empty();
    let mut cmd = preflight_cmd();
    cmd.arg("policy").arg(project.path()).args(["--profile", "nightly"]);

    run_exits(cmd, 3).stderr_has("unknown profile 'nightly'");
}

// =============================================================================
// INIT
// =============================================================================

/// > init writes a template that check accepts
#[test]
fn init_writes_usable_template() {
    let project = Project::empty();
    let mut cmd = preflight_cmd();
    cmd.arg("init")
        .arg(project.path())
        .args(["--rule-pack", "cli-tool", "--profile", "ci"]);
    run_exits(cmd, 0).stdout_has(".repo-preflight.toml");

    let content = std::fs::read_to_string(project.path().join(".repo-preflight.toml")).unwrap();
    assert!(content.contains("rule_pack = \"cli-tool\""));
    assert!(content.contains("diff_mode = \"pr\""));

    let mut cmd = preflight_cmd();
    cmd.arg("policy").arg(project.path());
    run_exits(cmd, 0)
        .stdout_has("- Rule pack: `cli-tool`")
        .stdout_has("- `license_present` -> `fail`");
}

/// > init refuses to overwrite without --force
#[test]
fn init_refuses_to_overwrite() {
    let project = Project::empty();
    project.file(".repo-preflight.toml", "# keep me\n");

    let mut cmd = preflight_cmd();
    cmd.arg("init").arg(project.path());
    run_exits(cmd, 3).stderr_has("already exists");

    let content = std::fs::read_to_string(project.path().join(".repo-preflight.toml")).unwrap();
    assert_eq!(content, "# keep me\n");

    let mut cmd = preflight_cmd();
    cmd.arg("init").arg(project.path()).arg("--force");
    run_exits(cmd, 0);
}
