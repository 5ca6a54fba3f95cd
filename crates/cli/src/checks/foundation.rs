// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository foundation checks.

use git2::{ErrorCode, StatusOptions};

use super::{open_repo, skipped_outside_repo};
use crate::check::{Check, CheckContext, Outcome, list_capped};
use crate::error::Result;
use crate::registry::ids;

pub struct GitRepository;

impl Check for GitRepository {
    fn id(&self) -> &'static str {
        ids::GIT_REPOSITORY
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        Ok(match open_repo(ctx.root) {
            Some(_) => Outcome::pass("path is inside a git work tree"),
            None => Outcome::fail("path is not a git repository")
                .with_fix("Run `git init` (or use an existing repository) before publishing."),
        })
    }
}

pub struct RemoteOrigin;

impl Check for RemoteOrigin {
    fn id(&self) -> &'static str {
        ids::REMOTE_ORIGIN
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        match repo.find_remote("origin") {
            Ok(remote) => {
                let url = remote.url().unwrap_or("<non-utf8 url>");
                Ok(Outcome::pass(format!("origin remote configured ({url})")))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(Outcome::warn(
                "no 'origin' remote configured",
            )
            .with_fix("Add a publish target: git remote add origin <url>")),
            Err(e) => Err(e.into()),
        }
    }
}

pub struct CleanWorktree;

impl Check for CleanWorktree {
    fn id(&self) -> &'static str {
        ids::CLEAN_WORKTREE
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = repo.statuses(Some(&mut opts))?;

        let dirty: Vec<String> = statuses
            .iter()
            .filter(|s| !s.status().is_empty())
            .filter_map(|s| s.path().map(String::from))
            .collect();
        if dirty.is_empty() {
            return Ok(Outcome::pass("working tree is clean"));
        }
        Ok(Outcome::warn(format!(
            "{} uncommitted change(s): {}",
            dirty.len(),
            list_capped(&dirty)
        ))
        .with_fix("Commit or stash pending changes before publishing."))
    }
}

pub struct DefaultBranchStyle;

impl Check for DefaultBranchStyle {
    fn id(&self) -> &'static str {
        ids::DEFAULT_BRANCH_STYLE
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        if repo.head_detached()? {
            return Ok(Outcome::warn("HEAD is detached, no current branch")
                .with_fix("Check out a branch (prefer main) before publishing."));
        }

        // Unborn branches have no HEAD commit but HEAD still names them.
        let head = repo.find_reference("HEAD")?;
        let branch = head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .unwrap_or_default()
            .to_string();

        if branch == "main" || branch == "master" {
            return Ok(Outcome::pass(format!("current branch '{branch}' is conventional")));
        }
        Ok(Outcome::warn(format!("current branch is '{branch}'"))
            .with_fix("Prefer 'main' (or document your branch policy) before a public release."))
    }
}

#[cfg(test)]
#[path = "foundation_tests.rs"]
mod tests;
