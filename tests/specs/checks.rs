//! Specs for the simple repository checks.

use crate::prelude::*;

/// > A publishable repository passes every check but the scanner
#[test]
fn publishable_repository_passes() {
    let project = Project::publishable();
    let report = project.check().args(&["--no-gitleaks"]).json(0);

    assert_eq!(report["summary"]["warn"], 0);
    assert_eq!(report["summary"]["fail"], 0);
    assert_eq!(report["results"].as_array().unwrap().len(), 17);
}

/// > A bare directory fails git_repository and reports git checks as skipped
#[test]
fn plain_directory() {
    let project = Project::empty();
    project.file("README.md", "# hi\n");
    let report = project
        .check()
        .args(&["--check-group", "foundation", "--check-group", "hygiene"])
        .json(2);

    assert_eq!(status_of(&report, "git_repository"), "fail");
    assert_eq!(status_of(&report, "remote_origin"), "warn");
    assert_eq!(status_of(&report, "tracked_env_files"), "warn");
    assert_eq!(status_of(&report, "gitignore_basics"), "fail");
}

/// > Missing README fails; missing LICENSE and SECURITY.md warn
#[test]
fn docs_presence() {
    let project = Project::git();
    project.file("notes.txt", "hi\n");
    project.commit("initial");

    let report = project.check().args(&["--check-group", "docs"]).json(2);
    assert_eq!(status_of(&report, "readme_present"), "fail");
    assert_eq!(status_of(&report, "license_present"), "warn");
    assert_eq!(status_of(&report, "security_policy_present"), "warn");
}

/// > Known license text without an SPDX identifier warns
#[test]
fn license_without_spdx_warns() {
    let project = Project::publishable();
    project.file(
        "LICENSE",
        "MIT License\n\nPermission is hereby granted, free of charge, to any person obtaining a copy\n",
    );
    project.commit("license");

    let report = project.check().args(&["--check-group", "docs"]).json(1);
    assert_eq!(status_of(&report, "license_identifier"), "warn");
}

/// > Tracked .env files fail; .env.example is allowed
#[test]
fn tracked_env_files() {
    let project = Project::publishable();
    project.file(".env.example", "TOKEN=\n");
    project.commit("example");
    let report = project.check().args(&["--check-group", "hygiene"]).json(0);
    assert_eq!(status_of(&report, "tracked_env_files"), "pass");

    project.file("config/.env.production", "TOKEN=abc\n");
    project.run_git(&["add", "-f", "config/.env.production"]);
    project.commit("oops");
    let report = project.check().args(&["--check-group", "hygiene"]).json(2);
    assert_eq!(status_of(&report, "tracked_env_files"), "fail");
    assert!(
        report["results"]
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r["message"].as_str().unwrap().contains("config/.env.production"))
    );
}

/// > Tracked key material fails
#[test]
fn tracked_keylike_files() {
    let project = Project::publishable();
    project.file("deploy/id_rsa", "-----BEGIN KEY-----\n");
    project.commit("key");

    let report = project.check().args(&["--check-group", "hygiene"]).json(2);
    assert_eq!(status_of(&report, "tracked_keylike_files"), "fail");
}

/// > .gitignore missing env patterns warns
#[test]
fn gitignore_missing_patterns() {
    let project = Project::publishable();
    project.file(".gitignore", "target/\n.env\n");
    project.commit("ignore");

    project
        .check()
        .args(&["--check-group", "hygiene", "-o", "compact"])
        .exits(1)
        .stdout_has("WARN gitignore_basics")
        .stdout_has(".env.*");
}

/// > Uncommitted changes and a non-standard branch warn
#[test]
fn worktree_and_branch() {
    let project = Project::publishable();
    project.run_git(&["checkout", "--quiet", "-b", "feature/x"]);
    project.file("scratch.txt", "wip\n");

    let report = project.check().args(&["--check-group", "foundation"]).json(1);
    assert_eq!(status_of(&report, "clean_worktree"), "warn");
    assert_eq!(status_of(&report, "default_branch_style"), "warn");
}

/// > Large tracked files and large history blobs warn at their thresholds
#[test]
fn size_thresholds() {
    let project = Project::publishable();
    project.sized("assets/video.bin", 64 * 1024);
    project.commit("video");
    project.run_git(&["rm", "--quiet", "assets/video.bin"]);
    project.commit("drop video");

    let report = project
        .check()
        .args(&[
            "--check-group",
            "size",
            "--max-tracked-file-kib",
            "16",
            "--max-history-blob-kib",
            "16",
        ])
        .json(1);
    // Deleted from the tree but still in history
    assert_eq!(status_of(&report, "tracked_large_files"), "pass");
    assert_eq!(status_of(&report, "history_large_blobs"), "warn");
}

/// > A missing scanner is reported as a warning, never an abort
#[test]
fn missing_gitleaks_warns() {
    let project = Project::publishable();
    let report = project
        .check()
        .args(&["--check-group", "secrets"])
        .env("PATH", "")
        .json(1);

    assert_eq!(status_of(&report, "gitleaks_scan"), "warn");
}

/// > Overrides remap findings, not passes
#[test]
fn severity_override_escalates() {
    let project = Project::git();
    project.file("README.md", "# demo\n");
    project.file(
        ".repo-preflight.toml",
        "[severity_overrides]\nsecurity_policy_present = \"fail\"\nlicense_present = \"pass\"\nreadme_present = \"warn\"\n",
    );
    project.commit("initial");

    let report = project.check().args(&["--check-group", "docs"]).json(2);
    assert_eq!(status_of(&report, "readme_present"), "pass");
    assert_eq!(status_of(&report, "license_present"), "pass");
    assert_eq!(status_of(&report, "security_policy_present"), "fail");
}
