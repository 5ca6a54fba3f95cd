//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the repo-preflight binary against
//! throwaway repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Variables that would leak the host CI's pull request into a spec.
const HOST_VARS: &[&str] = &[
    "GITHUB_BASE_REF",
    "GITHUB_SHA",
    "CI_MERGE_REQUEST_DIFF_BASE_SHA",
    "CI_MERGE_REQUEST_TARGET_BRANCH_NAME",
    "CI_COMMIT_SHA",
    "SYSTEM_PULLREQUEST_TARGETBRANCH",
    "BUILD_SOURCEVERSION",
    "BUILDKITE_PULL_REQUEST_BASE_BRANCH",
    "BUILDKITE_COMMIT",
    "REPO_PREFLIGHT_CONFIG",
    "REPO_PREFLIGHT_LOG",
    "COLOR",
    "NO_COLOR",
];

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the repo-preflight binary
pub fn preflight_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-preflight"));
    for var in HOST_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A temporary directory, optionally a git repository on `main`.
pub struct Project {
    dir: TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Plain directory, not a repository.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Fresh git repository with a committer identity.
    pub fn git() -> Self {
        let project = Self::empty();
        project.run_git(&["init", "--quiet"]);
        project.run_git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        project.run_git(&["config", "user.email", "spec@example.com"]);
        project.run_git(&["config", "user.name", "Spec"]);
        project.run_git(&["config", "commit.gpgsign", "false"]);
        project
    }

    /// A repository that passes every non-network check: docs, a
    /// `.gitignore` covering env files, and a clean single commit.
    pub fn publishable() -> Self {
        let project = Self::git();
        project
            .file("README.md", "# demo\n")
            .file("LICENSE", "SPDX-License-Identifier: MIT\n\nMIT License\n")
            .file("SECURITY.md", "Report issues privately.\n")
            .file(".gitignore", ".env\n.env.*\n!.env.example\n");
        project.run_git(&["remote", "add", "origin", "https://example.com/demo.git"]);
        project.commit("initial");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, path: &str, content: &str) -> &Self {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
        self
    }

    /// Write a file of `size` bytes.
    pub fn sized(&self, path: &str, size: usize) -> &Self {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, vec![b'x'; size]).unwrap();
        self
    }

    /// Stage everything and commit, returning the commit id.
    pub fn commit(&self, message: &str) -> String {
        self.run_git(&["add", "-A"]);
        self.run_git(&["commit", "--quiet", "--allow-empty", "-m", message]);
        self.run_git(&["rev-parse", "HEAD"])
    }

    /// Run git in the project and return trimmed stdout.
    pub fn run_git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("git should run");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Builder for `repo-preflight check <project>`.
    pub fn check(&self) -> CheckBuilder {
        CheckBuilder::new(self.path().to_path_buf())
    }
}

/// Fluent builder for a `check` invocation.
pub struct CheckBuilder {
    path: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl CheckBuilder {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }

    /// Run with `-o json`, assert the exit code, and parse stdout.
    pub fn json(mut self, code: i32) -> serde_json::Value {
        self.args.extend(["-o".to_string(), "json".to_string()]);
        let run = run_exits(self.command(), code);
        serde_json::from_str(&run.stdout()).unwrap_or_else(|e| {
            panic!("stdout is not JSON: {e}\n{}", run.stdout());
        })
    }

    fn command(self) -> Command {
        let mut cmd = preflight_cmd();
        cmd.arg("check").arg(&self.path).args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

pub fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Status of the result with `id` in a JSON report.
pub fn status_of<'a>(report: &'a serde_json::Value, id: &str) -> &'a str {
    report["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
        .unwrap_or_else(|| panic!("no result for {id}"))["status"]
        .as_str()
        .unwrap()
}
