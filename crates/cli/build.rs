// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build script that generates env var name constants for `env.rs`.

// Build scripts panic on failure; there is no recovery.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::env;
use std::fs;
use std::path::Path;

/// (constant name, doc line) pairs; the constant value equals its name.
const NAMES: &[(&str, &str)] = &[
    ("NO_COLOR", "disables color output (any value)."),
    ("COLOR", "forces color output (any value)."),
    ("REPO_PREFLIGHT_LOG", "configures tracing log filter."),
    ("REPO_PREFLIGHT_CONFIG", "path to the config file (same as --config)."),
    ("GITHUB_BASE_REF", "GitHub Actions pull request base branch."),
    ("GITHUB_SHA", "GitHub Actions commit under test."),
    ("CI_MERGE_REQUEST_DIFF_BASE_SHA", "GitLab merge request diff base commit."),
    ("CI_MERGE_REQUEST_TARGET_BRANCH_NAME", "GitLab merge request target branch."),
    ("CI_COMMIT_SHA", "GitLab commit under test."),
    ("SYSTEM_PULLREQUEST_TARGETBRANCH", "Azure Pipelines pull request target branch."),
    ("BUILD_SOURCEVERSION", "Azure Pipelines commit under test."),
    ("BUILDKITE_PULL_REQUEST_BASE_BRANCH", "Buildkite pull request base branch."),
    ("BUILDKITE_COMMIT", "Buildkite commit under test."),
];

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("env_names.rs");

    let mut contents = String::new();
    for (name, doc) in NAMES {
        contents.push_str(&format!(
            "/// Environment variable: {doc}\npub const {name}: &str = \"{name}\";\n"
        ));
    }

    fs::write(dest, contents).expect("failed to write env_names.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
