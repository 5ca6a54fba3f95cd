// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Secret hygiene checks over `.gitignore` and the index.

use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::{file_name, open_repo, skipped_outside_repo, tracked_paths};
use crate::check::{Check, CheckContext, Outcome, list_capped};
use crate::error::{Error, Result};
use crate::registry::ids;

/// Lines `.gitignore` must contain.
pub const REQUIRED_IGNORE_PATTERNS: &[&str] = &[".env", ".env.*", "!.env.example"];

/// File-name globs for keys and credential stores.
const KEYLIKE_GLOBS: &[&str] = &[
    "*.pem",
    "*.key",
    "*.p12",
    "*.pfx",
    "*.kdbx",
    "id_rsa",
    "id_ed25519",
    "credentials.json",
];

#[allow(clippy::expect_used)]
static KEYLIKE: LazyLock<GlobSet> = LazyLock::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in KEYLIKE_GLOBS {
        builder.add(Glob::new(pattern).expect("valid glob"));
    }
    builder.build().expect("valid glob set")
});

pub struct GitignoreBasics;

impl Check for GitignoreBasics {
    fn id(&self) -> &'static str {
        ids::GITIGNORE_BASICS
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let path = ctx.root.join(".gitignore");
        if !path.is_file() {
            return Ok(Outcome::fail(".gitignore is missing")
                .with_fix("Add a .gitignore covering env files and build artifacts."));
        }
        let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        let missing = missing_ignore_patterns(&content);
        if missing.is_empty() {
            return Ok(Outcome::pass(".gitignore covers env files"));
        }
        Ok(Outcome::warn(format!(
            ".gitignore missing patterns: {}",
            missing.join(", ")
        ))
        .with_fix("Add the missing env patterns to keep secrets out of commits."))
    }
}

/// Required patterns absent from `.gitignore` content, compared per line.
///
/// Root-anchored forms (`/.env`, `!/.env.example`) count as present.
pub fn missing_ignore_patterns(content: &str) -> Vec<&'static str> {
    let lines: Vec<String> = content.lines().map(unanchored).collect();
    REQUIRED_IGNORE_PATTERNS
        .iter()
        .copied()
        .filter(|pattern| !lines.iter().any(|line| line == pattern))
        .collect()
}

fn unanchored(line: &str) -> String {
    let line = line.trim();
    match line.strip_prefix('!') {
        Some(rest) => format!("!{}", rest.strip_prefix('/').unwrap_or(rest)),
        None => line.strip_prefix('/').unwrap_or(line).to_string(),
    }
}

/// `.env` or `.env.<anything>`, except the `.env.example` placeholder.
pub fn is_env_file(path: &str) -> bool {
    let name = file_name(path);
    name == ".env" || (name.starts_with(".env.") && name != ".env.example")
}

pub fn is_keylike_file(path: &str) -> bool {
    KEYLIKE.is_match(file_name(path))
}

pub struct TrackedEnvFiles;

impl Check for TrackedEnvFiles {
    fn id(&self) -> &'static str {
        ids::TRACKED_ENV_FILES
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        let found: Vec<String> = tracked_paths(&repo)?
            .into_iter()
            .filter(|p| is_env_file(p))
            .collect();
        if found.is_empty() {
            return Ok(Outcome::pass("no tracked .env files"));
        }
        Ok(Outcome::fail(format!("tracked env files: {}", list_capped(&found)))
            .with_fix("Remove them from the index and history; keep only .env.example."))
    }
}

pub struct TrackedKeylikeFiles;

impl Check for TrackedKeylikeFiles {
    fn id(&self) -> &'static str {
        ids::TRACKED_KEYLIKE_FILES
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        let found: Vec<String> = tracked_paths(&repo)?
            .into_iter()
            .filter(|p| is_keylike_file(p))
            .collect();
        if found.is_empty() {
            return Ok(Outcome::pass("no tracked key or credential files"));
        }
        Ok(Outcome::fail(format!(
            "tracked key-like files: {}",
            list_capped(&found)
        ))
        .with_fix("Remove keys and credentials from the repository and rotate them."))
    }
}

#[cfg(test)]
#[path = "hygiene_tests.rs"]
mod tests;
