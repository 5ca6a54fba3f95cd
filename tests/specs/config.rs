//! Specs for config discovery, validation and precedence.

use crate::prelude::*;

/// > A malformed config file aborts before any check runs (exit 3)
#[test]
fn malformed_config_exits_3() {
    let project = Project::publishable();
    project.file(".repo-preflight.toml", "[preflight\nstrict = true\n");

    project
        .check()
        .exits(3)
        .stderr_has("config error")
        .stdout_lacks("repo-preflight:");
}

/// > An unknown severity value is a config error
#[test]
fn unknown_severity_value_exits_3() {
    let project = Project::publishable();
    project.file(
        ".repo-preflight.toml",
        "[severity_overrides]\nreadme_present = \"critical\"\n",
    );

    project.check().exits(3).stderr_has("readme_present");
}

/// > A severity override for an unknown check id is rejected, with a suggestion
#[test]
fn unknown_override_id_exits_3() {
    let project = Project::publishable();
    project.file(
        ".repo-preflight.toml",
        "[severity_overrides]\nreadme_presnt = \"warn\"\n",
    );

    project
        .check()
        .exits(3)
        .stderr_has("unknown check id 'readme_presnt'")
        .stderr_has("did you mean 'readme_present'?");
}

/// > A wrongly typed value names the offending key
#[test]
fn wrong_type_names_key() {
    let project = Project::publishable();
    project.file(".repo-preflight.toml", "[preflight]\nstrict = \"yes\"\n");

    project
        .check()
        .exits(3)
        .stderr_has("preflight.strict: expected a boolean, found string");
}

/// > Unknown keys warn but do not fail
#[test]
fn unknown_key_warns() {
    let project = Project::publishable();
    project.file(".repo-preflight.toml", "[preflight]\nstrictness = true\n");
    project.commit("config");

    project
        .check()
        .args(&["--no-gitleaks"])
        .exits(0)
        .stderr_has("warning:")
        .stderr_has("unrecognized field `preflight.strictness`");
}

/// > --config pointing at a missing file is a config error
#[test]
fn missing_explicit_config_exits_3() {
    let project = Project::publishable();

    project
        .check()
        .args(&["--config", "does-not-exist.toml"])
        .exits(3)
        .stderr_has("config file not found");
}

/// > REPO_PREFLIGHT_CONFIG is an alternative to --config
#[test]
fn config_from_env_var() {
    let project = Project::publishable();
    let elsewhere = Project::empty();
    elsewhere.file("strict.toml", "[preflight]\nmax_tracked_file_kib = 1\n");
    project.sized("data.bin", 4096);
    project.commit("data");

    let config = elsewhere.path().join("strict.toml");
    let report = project
        .check()
        .args(&["--no-gitleaks", "--check-group", "size"])
        .env("REPO_PREFLIGHT_CONFIG", config.to_str().unwrap())
        .json(1);

    assert_eq!(report["max_tracked_file_kib"], 1);
    assert_eq!(report["config_path"], config.to_str().unwrap());
    assert_eq!(status_of(&report, "tracked_large_files"), "warn");
}

/// > --no-config ignores the discovered file
#[test]
fn no_config_ignores_file() {
    let project = Project::publishable();
    project.file(".repo-preflight.toml", "[preflight]\nstrict = \"broken\"\n");
    project.commit("config");

    let report = project
        .check()
        .args(&["--no-config", "--no-gitleaks"])
        .json(0);
    assert_eq!(report["config_path"], serde_json::Value::Null);
}

/// > CLI flags override the config file, field by field
#[test]
fn cli_overrides_config() {
    let project = Project::publishable();
    project.file(
        ".repo-preflight.toml",
        "[preflight]\nprofile = \"ci\"\nmax_diff_files = 10\ndiff_mode = \"manual\"\n",
    );
    project.commit("config");

    let report = project
        .check()
        .args(&["--no-strict", "--no-gitleaks", "--check-group", "docs"])
        .json(0);
    assert_eq!(report["profile"], "ci");
    assert_eq!(report["strict"], false);
    assert_eq!(report["max_diff_files"], 10);
    assert_eq!(report["diff_mode"], "manual");
}

/// > Groups narrow; exclude always removes
#[test]
fn groups_and_exclude() {
    let project = Project::publishable();
    project.file(
        ".repo-preflight.toml",
        "[checks]\nexclude = [\"clean_worktree\"]\n",
    );
    project.commit("config");

    let report = project
        .check()
        .args(&["--check-group", "foundation", "--check-group", "secrets", "--no-gitleaks"])
        .json(0);
    assert_eq!(
        report["check_ids"],
        serde_json::json!(["git_repository", "remote_origin", "default_branch_style"])
    );
}

/// > A `disabled` override drops the check from the run
#[test]
fn disabled_override_removes_check() {
    let project = Project::publishable();
    project.file(
        ".repo-preflight.toml",
        "[severity_overrides]\nremote_origin = \"disabled\"\n",
    );
    project.commit("config");

    let report = project
        .check()
        .args(&["--check-group", "foundation"])
        .json(0);
    assert_eq!(
        report["check_ids"],
        serde_json::json!(["git_repository", "clean_worktree", "default_branch_style"])
    );
}
